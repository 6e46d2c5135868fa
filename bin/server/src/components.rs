//! Components shared by every page.

pub mod chatbot;

pub use chatbot::ChatBot;
