// shared fakes and fixtures for the integration tests

pub mod port_fakes;
