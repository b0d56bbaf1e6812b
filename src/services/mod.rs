mod cache;
mod resolver;

pub use cache::CacheResolver;
pub use resolver::ResolverService;
