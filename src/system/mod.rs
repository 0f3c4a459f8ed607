pub mod collector;
pub mod history;
pub mod kill;
pub mod platform;
pub mod process;
pub mod process_sampler;
pub mod snapshot;
pub mod source;
pub mod system_sampler;
