//! ページ上のコンポーネント

pub mod archive_paginator;
pub mod calendar;
pub mod detail_modal;
pub mod lightbox;
pub mod navigator;
pub mod stack_modal;
