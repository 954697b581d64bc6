pub mod chat_panel;
pub mod force_graph;
pub mod history_panel;
