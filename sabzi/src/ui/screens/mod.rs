pub mod bills_screen;
pub mod logs_screen;
pub mod providers_screen;

use crate::state::{BillsState, LogsState, ProvidersState};

#[derive(Debug, Clone)]
pub enum Screen {
    Bills(Box<BillsState>),
    Providers(ProvidersState),
    Logs(LogsState),
}
