use chrono::TimeDelta;

const SECS_PER_DAY: i64 = 86_400;

/// Render a remaining duration as `N days, H:MM:SS` (whole seconds).
///
/// The day prefix is omitted below one day; negative values get a leading `-`.
pub fn format_remaining(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs() as i64;

    let days = total / SECS_PER_DAY;
    let rest = total % SECS_PER_DAY;
    let clock = format!("{}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60);

    match days {
        0 => format!("{sign}{clock}"),
        1 => format!("{sign}1 day, {clock}"),
        n => format!("{sign}{n} days, {clock}"),
    }
}
