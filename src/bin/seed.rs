//! Seed a running snooze service with realistic sample notifications.
//!
//! ```text
//! snooze-seed --sample pagerduty
//! snooze-seed --all --minutes 30
//! ```

use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use clap::Parser;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

struct Sample {
    key: &'static str,
    title: &'static str,
    body: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        key: "calendar",
        title: "Calendar Invite",
        body: "Weekly sync with Product starts in 20 minutes on Zoom. Agenda covers launch blockers, \
               the KPI review and sign-off on the marketing one-pager. Bring the Growth dashboard link \
               so the slides can be annotated live.",
    },
    Sample {
        key: "flight-checkin",
        title: "Flight Check-In",
        body: "Online check-in for your BOS to SFO flight opens in 15 minutes. Confirm TSA PreCheck and \
               finish the passport upload. Seats are filling quickly, so confirm now to keep the \
               exit-row upgrade.",
    },
    Sample {
        key: "news",
        title: "News Alert",
        body: "The Fed hinted at rate cuts later this year as inflation cooled for a third month. \
               Futures are up 1.3% and analysts expect tech to rally. Read the recap before \
               tomorrow's investor update.",
    },
    Sample {
        key: "pagerduty",
        title: "PagerDuty",
        body: "Incident #14322 (api-prod-1 CPU) triggered. Error rate is up 320% over the last 5 \
               minutes, latency is above 1.8s and customer traffic is being throttled. Acknowledge \
               within 2 minutes and join the bridge.",
    },
    Sample {
        key: "rent",
        title: "Rent Payment",
        body: "Rent for 25 Larkin St is due tomorrow. Pay in the resident portal to avoid late fees and \
               include the parking add-on. ACH transfers take 24h, so pay by card if you are running \
               behind.",
    },
    Sample {
        key: "school",
        title: "School Pickup",
        body: "Lincoln Elementary: the parent-teacher conference moved to 3:30 PM and the teacher asks \
               you to bring last week's reading log. Parking lot construction will add 10 minutes to \
               pickup.",
    },
];

#[derive(Parser, Debug)]
#[command(name = "snooze-seed", about = "Seed the snooze service with sample notifications")]
struct Args {
    /// Backend base URL
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "SNOOZE_BASE_URL")]
    base_url: String,

    /// Sample key to seed; repeat to add several
    #[arg(long = "sample", value_parser = sample_key)]
    samples: Vec<String>,

    /// Seed every sample
    #[arg(long)]
    all: bool,

    /// Minutes from now to snooze each sample until
    #[arg(long, default_value_t = 45)]
    minutes: i64,
}

fn sample_key(value: &str) -> Result<String, String> {
    if SAMPLES.iter().any(|s| s.key == value) {
        Ok(value.to_string())
    } else {
        let keys: Vec<&str> = SAMPLES.iter().map(|s| s.key).collect();
        Err(format!("unknown sample '{}', expected one of: {}", value, keys.join(", ")))
    }
}

fn selected(args: &Args) -> Vec<&'static Sample> {
    if args.all {
        return SAMPLES.iter().collect();
    }
    SAMPLES
        .iter()
        .filter(|s| args.samples.iter().any(|k| k == s.key))
        .collect()
}

async fn post_json(client: &Client, url: String, body: Value) -> anyhow::Result<Value> {
    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("POST {} failed", url))?
        .error_for_status()
        .with_context(|| format!("POST {} returned an error status", url))?;

    response
        .json()
        .await
        .with_context(|| format!("POST {} returned invalid JSON", url))
}

async fn seed_sample(client: &Client, base: &str, sample: &Sample, minutes: i64) -> anyhow::Result<()> {
    let summary = post_json(client, format!("{}/summarize", base), json!({ "text": sample.body })).await?;
    let classified = post_json(client, format!("{}/classify", base), json!({ "text": sample.body })).await?;

    let payload = json!({
        "id": uuid::Uuid::new_v4().simple().to_string(),
        "title": sample.title,
        "body": sample.body,
        "summary": summary["summary"],
        "urgency": classified["urgency"],
        "snoozeUntil": (Utc::now() + Duration::minutes(minutes)).to_rfc3339(),
    });

    let stored = post_json(client, format!("{}/store", base), payload).await?;
    println!("Seeded {} -> {}", sample.key, stored);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let samples = selected(&args);
    if samples.is_empty() {
        bail!("provide at least one --sample or use --all");
    }

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    let base = args.base_url.trim_end_matches('/');

    for sample in samples {
        seed_sample(&client, base, sample, args.minutes).await?;
    }

    Ok(())
}
