pub mod core;

pub use core::{
    Function, Message, Parameters, Property, Role, Tool, ToolType, completion,
    tool_call_arguments,
};
