mod method;
mod resource;

pub use self::method::HttpMethod;
pub use self::resource::Resource;
