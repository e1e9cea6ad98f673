mod trace;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use pinchframe::{
    GestureEngine, GestureHost, HostResult, Notification, TouchInput, TouchPoint,
};

use trace::{parse_expected_kinds, parse_trace, TraceRecord};

pub(crate) const GESTURE_KINDS: [&str; 6] = [
    "swipe_left",
    "swipe_right",
    "double_tap_zoom",
    "double_tap_reset_zoom",
    "long_press",
    "two_finger_long_press",
];

#[derive(Debug, Parser)]
#[command(name = "touch_replay")]
#[command(about = "Replay a recorded touch trace through the gesture engine")]
struct Cli {
    trace: PathBuf,
    #[arg(long)]
    expect: Option<PathBuf>,
    /// Surface center used for double-tap zoom offsets, as `x,y`.
    #[arg(long, value_parser = parse_center)]
    center: Option<TouchPoint>,
}

#[derive(Debug)]
enum Row {
    Gesture { ms: u64, kind: &'static str },
    Transform { ms: u64, scale: f32, tx: f32, ty: f32 },
}

/// Host that records every delivered call against the current trace time.
#[derive(Default)]
struct ReplayHost {
    now_ms: u64,
    center: Option<TouchPoint>,
    rows: Vec<Row>,
}

impl ReplayHost {
    fn gesture(&mut self, kind: &'static str) -> HostResult {
        self.rows.push(Row::Gesture {
            ms: self.now_ms,
            kind,
        });
        Ok(())
    }
}

impl GestureHost for ReplayHost {
    fn swipe_left(&mut self) -> HostResult {
        self.gesture("swipe_left")
    }

    fn swipe_right(&mut self) -> HostResult {
        self.gesture("swipe_right")
    }

    fn double_tap_zoom(&mut self, _point: TouchPoint) -> HostResult {
        self.gesture("double_tap_zoom")
    }

    fn double_tap_reset_zoom(&mut self) -> HostResult {
        self.gesture("double_tap_reset_zoom")
    }

    fn long_press(&mut self) -> HostResult {
        self.gesture("long_press")
    }

    fn two_finger_long_press(&mut self) -> HostResult {
        self.gesture("two_finger_long_press")
    }

    fn apply_visual_transform(&mut self, scale: f32, tx: f32, ty: f32) -> HostResult {
        self.rows.push(Row::Transform {
            ms: self.now_ms,
            scale,
            tx,
            ty,
        });
        Ok(())
    }

    fn surface_center(&self) -> Option<TouchPoint> {
        self.center
    }

    fn notify(&mut self, notification: Notification) {
        log::warn!("host notification: {notification}");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let records = parse_trace(&cli.trace)?;
    log::debug!("loaded {} trace records", records.len());

    let host = ReplayHost {
        center: cli.center,
        ..ReplayHost::default()
    };
    let mut engine = GestureEngine::new(host);
    for record in &records {
        engine.host_mut().now_ms = record.ms();
        match record {
            TraceRecord::Touch {
                ms,
                phase,
                touches,
                changed,
            } => {
                let input = TouchInput {
                    phase: *phase,
                    t_ms: *ms,
                    touches,
                    changed,
                };
                engine.handle_input(&input);
            }
            TraceRecord::Tick { ms } => {
                engine.tick(*ms);
            }
        }
    }

    let counters = engine.counters();
    log::info!("replay counters: {counters:?}");
    let host = engine.into_host();

    println!("row,ms,kind_or_scale,tx,ty");
    for row in &host.rows {
        match row {
            Row::Gesture { ms, kind } => println!("gesture,{ms},{kind}"),
            Row::Transform { ms, scale, tx, ty } => {
                println!("transform,{ms},{scale:.3},{tx:.3},{ty:.3}")
            }
        }
    }

    if let Some(expect_path) = cli.expect {
        let expected = parse_expected_kinds(&expect_path)?;
        let actual: Vec<&str> = host
            .rows
            .iter()
            .filter_map(|row| match row {
                Row::Gesture { kind, .. } => Some(*kind),
                Row::Transform { .. } => None,
            })
            .collect();
        if actual != expected {
            eprintln!("expected kinds: {}", expected.join(","));
            eprintln!("actual kinds:   {}", actual.join(","));
            bail!("gesture sequence mismatch");
        }
    }

    Ok(())
}

fn parse_center(raw: &str) -> Result<TouchPoint, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{raw}'"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("invalid x: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("invalid y: {e}"))?;
    Ok(TouchPoint::new(x, y))
}
