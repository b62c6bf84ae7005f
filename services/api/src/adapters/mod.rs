pub mod clipboard;
pub mod file_store;
pub mod generation_http;

#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboardAdapter;
pub use clipboard::NoopClipboardAdapter;
pub use file_store::FileKeyValueStore;
pub use generation_http::HttpGenerationAdapter;
