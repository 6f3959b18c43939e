//! Test modules for the WLS decoder service
