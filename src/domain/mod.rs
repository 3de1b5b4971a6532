// Domain layer - Samples, sessions and their statistics
pub mod dive_session;
pub mod sample;
