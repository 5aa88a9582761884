pub mod server;

/// Action parsed from the command line.
#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        frontend_url: String,
    },
}
