pub mod article;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod guard;
pub mod importer;
pub mod ipcheck;
pub mod normalize;
pub mod parse;
pub mod sanitize;
pub mod scoring;

pub use article::NormalizedArticle;
pub use encoding::{DecodedDocument, decode};
pub use error::{Result, TextgateError};
pub use extract::{ArticleExtractor, ExtractedArticle, ExtractorConfig, HeuristicExtractor};
pub use fetch::{FetchConfig, FetchResult, fetch, fetch_with_resolver};
pub use guard::{AuthorizedTarget, Resolver, SystemResolver, authorize, authorize_with_resolver};
pub use importer::{ImportConfig, Importer, import_article};
pub use ipcheck::is_private_ip;
pub use normalize::{collapse_newlines, normalize, normalize_line_endings};
pub use parse::{Document, Element};
pub use sanitize::sanitize_html;
