use fraktura_core::error::FrakturaError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), FrakturaError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
