mod groq_api;
mod rewrite_provider;

pub use groq_api::GroqRewriteProvider;
pub use rewrite_provider::RewriteProvider;
