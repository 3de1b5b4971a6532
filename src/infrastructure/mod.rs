// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod influx_source;
pub mod json_mapper;
pub mod ndjson_stream;
