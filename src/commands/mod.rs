pub mod uptime;

use crate::services::ReportComposer;

pub struct Data {
    pub reports: ReportComposer,
}
