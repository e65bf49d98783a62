pub mod operands;
pub use operands::*;

pub mod factory_config;
pub use factory_config::*;

pub mod stream_factory;
pub use stream_factory::*;
