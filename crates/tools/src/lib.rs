pub mod logging;
pub mod overrides;
pub mod seed;
