use time::OffsetDateTime;

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

pub fn time_ago(then: OffsetDateTime, now: OffsetDateTime) -> String {
	let seconds = (now - then).whole_seconds();
	let distance = distance_words(seconds.abs());

	if seconds < 0 { format!("in {distance}") } else { format!("{distance} ago") }
}

fn distance_words(seconds: i64) -> String {
	let minutes = round_div(seconds, 60);

	if minutes < 2 {
		return if minutes == 0 {
			"less than a minute".to_string()
		} else {
			"1 minute".to_string()
		};
	}
	if minutes < 45 {
		return format!("{minutes} minutes");
	}
	if minutes < 90 {
		return "about 1 hour".to_string();
	}
	if minutes < MINUTES_IN_DAY {
		return format!("about {} hours", round_div(minutes, 60));
	}
	if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
		return "1 day".to_string();
	}
	if minutes < MINUTES_IN_MONTH {
		return format!("{} days", round_div(minutes, MINUTES_IN_DAY));
	}
	if minutes < MINUTES_IN_TWO_MONTHS {
		let months = round_div(minutes, MINUTES_IN_MONTH);

		return plural("about ", months, "month");
	}

	let months = minutes / MINUTES_IN_MONTH;

	if months < 12 {
		return format!("{} months", round_div(minutes, MINUTES_IN_MONTH));
	}

	let years = months / 12;
	let remainder = months % 12;

	if remainder < 3 {
		plural("about ", years, "year")
	} else if remainder < 9 {
		plural("over ", years, "year")
	} else {
		plural("almost ", years + 1, "year")
	}
}

fn plural(prefix: &str, count: i64, unit: &str) -> String {
	if count == 1 { format!("{prefix}1 {unit}") } else { format!("{prefix}{count} {unit}s") }
}

fn round_div(value: i64, divisor: i64) -> i64 {
	(value + divisor / 2) / divisor
}
