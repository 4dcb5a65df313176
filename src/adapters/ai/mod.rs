//! Language oracle adapters.

mod openai_oracle;
mod scripted_oracle;

pub use openai_oracle::OpenAiOracle;
pub use scripted_oracle::ScriptedOracle;
