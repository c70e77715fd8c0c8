use crate::log::IntervalLog;

#[derive(Clone)]
pub struct AppState<A> {
    pub auth: A,
    pub log: IntervalLog,
}
