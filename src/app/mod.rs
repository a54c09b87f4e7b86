// Application layer: the interactive console surface and result formatting.

pub mod menu;
pub mod report;
