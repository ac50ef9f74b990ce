pub mod stub_server;
