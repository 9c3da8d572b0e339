//! OpenAPI document model and loaders

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;
pub mod parser;
pub mod types;

pub use composite_loader::CompositeOpenApiLoader;
pub use file_loader::FileOpenApiLoader;
pub use http_loader::HttpOpenApiLoader;
pub use parser::OpenApiParser;
pub use types::{
    ApiInfo, Components, HttpMethod, MediaType, OpenApiDocument, Operation, OperationRef,
    Parameter, ParameterLocation, PathItem, RequestBody, Response, Schema, ref_name,
};
