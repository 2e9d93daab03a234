//! Command-line front end for the segment sweep.
//!
//! Run with: cargo run --features cli -- --access-token <TOKEN>

use std::process::ExitCode;

use clap::Parser;
use log::error;

use segment_explorer::{explore, Coordinate, ExploreConfig, SegmentId, StravaClient};

/// Explore Strava segments that end near a reference corner
#[derive(Parser, Debug)]
#[command(name = "segment-explorer", version, about)]
struct Args {
    /// Reference corner latitude and longitude
    #[arg(long, num_args = 2, value_names = ["LAT", "LNG"], allow_negative_numbers = true,
          default_values_t = [37.512844, -121.881369])]
    segment_coordinates: Vec<f64>,

    /// Farthest sweep distance in kilometers (capped at 20)
    #[arg(long, default_value_t = 10)]
    distance: u32,

    /// First sweep distance in kilometers
    #[arg(long, default_value_t = 5)]
    distance_start: u32,

    /// Max range in kilometers past the corner for a segment end (capped at 0.5)
    #[arg(long, default_value_t = 1.0)]
    within: f64,

    /// Sweep step in kilometers
    #[arg(long, default_value_t = 2)]
    step: u32,

    /// Activity type for the segment search
    #[arg(long, default_value = "running")]
    activity_type: String,

    /// Print the start and end of this segment and exit
    #[arg(long)]
    segment_id: Option<SegmentId>,

    /// Strava API access token
    #[arg(long, env = "STRAVA_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,
}

fn fmt_latlng(c: Option<Coordinate>) -> String {
    c.map_or_else(|| "-".to_string(), |c| c.to_string())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let client = StravaClient::new(&args.access_token)?;

    if let Some(id) = args.segment_id {
        match client.segment(id)? {
            Some(segment) => println!(
                "{} {} {}",
                segment.name,
                fmt_latlng(segment.start_latlng),
                fmt_latlng(segment.end_latlng)
            ),
            None => println!("Segment {} not found", id),
        }
        return Ok(());
    }

    let origin = Coordinate::from_slice(&args.segment_coordinates)?;
    let config = ExploreConfig {
        distance_start_km: args.distance_start,
        distance_end_km: args.distance,
        within_km: args.within,
        step_km: args.step,
        activity_type: args.activity_type,
    };

    let result = explore(&client, &client, &origin, &config)?;
    let athlete = client.athlete()?;

    println!(
        "Athlete {} ID {} Segments {} efforts {}",
        athlete.firstname,
        athlete.id,
        result.segments.len(),
        result.total_efforts
    );
    for (name, efforts) in result.effort_breakdown() {
        println!("Segment {}, Efforts {}", name, efforts);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["segment-explorer", "--access-token", "abc"]).unwrap();
        assert_eq!(args.segment_coordinates, vec![37.512844, -121.881369]);
        assert_eq!(args.distance, 10);
        assert_eq!(args.distance_start, 5);
        assert_eq!(args.within, 1.0);
        assert_eq!(args.step, 2);
        assert_eq!(args.segment_id, None);
    }

    #[test]
    fn test_args_negative_coordinates() {
        let args = Args::try_parse_from([
            "segment-explorer",
            "--access-token",
            "abc",
            "--segment-coordinates",
            "52.20472",
            "-0.14056",
            "--segment-id",
            "3991086",
        ])
        .unwrap();
        assert_eq!(args.segment_coordinates, vec![52.20472, -0.14056]);
        assert_eq!(args.segment_id, Some(3991086));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
