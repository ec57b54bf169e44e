//! Read-only Chroma REST client.
//!
//! `ChromaSource` implements `chromaview_core::traits::CollectionSource`: it
//! lists collection names and loads a whole collection as `Item`s, zipping
//! Chroma's parallel result arrays by index.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod client;
pub mod source;
pub mod wire;

pub use client::ChromaClient;
pub use source::ChromaSource;
