//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the controller through
//! real or mock adapters.  Everything runs on the host; on-disk tests use
//! a throwaway temp directory.

mod mock_ports;
mod storage_tests;
