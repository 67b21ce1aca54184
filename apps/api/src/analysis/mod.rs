// Résumé analysis: the "Tell About the Resume" and "Percentage Match" actions.
// All flow calls go through flow_client — no direct Langflow calls here.

pub mod actions;
pub mod handlers;
pub mod prompts;
pub mod resume_text;
