//! Test modules for the wave loader service
