use crate::types::report::HealthReport;

pub fn to_yaml(report: &HealthReport) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(report)
}
