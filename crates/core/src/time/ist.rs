use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};

// India Standard Time, UTC+05:30. No DST.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub fn resolve_as_of_date(
    as_of_date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = as_of_date_arg {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid as_of_date {s:?}, expected YYYY-MM-DD"));
    }

    let ist = chrono::FixedOffset::east_opt(IST_OFFSET_SECS).context("invalid IST offset")?;
    Ok(now_utc.with_timezone(&ist).date_naive())
}

/// "Month DD, YYYY", as interpolated into the search query.
pub fn query_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}
