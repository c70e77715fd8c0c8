pub mod routes {
    pub const HEALTH: &str = "/health";

    pub const JOB_START: &str = "/jobs/{id}/start";
    pub const JOB_STOP: &str = "/jobs/{id}/stop";
    pub const JOB_STATUS: &str = "/jobs/{id}/status";
}
