pub mod av;
pub mod av_dto;
pub mod http;
pub mod reference;
pub mod utils;

pub use av::UrlBuilder;
pub use http::{Fetch, HttpFetcher};
pub use reference::{AvReferenceLists, CodeList, ReferenceLists};
