#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use av_view as view;

pub use av_view::{ArrayView, ArrayViewMut, Contiguous, ContiguousMut, OutOfRange, observe};
