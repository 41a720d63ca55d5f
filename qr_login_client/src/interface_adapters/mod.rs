// Interface adapters: HTTP client, token handoff, and terminal rendering.

pub mod clients;
pub mod handoff;
pub mod render;
