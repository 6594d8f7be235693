pub mod formspree;
pub mod gemini;
pub mod memory;
