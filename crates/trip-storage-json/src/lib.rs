use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use trip_core::{trip_warnings, BalanceService, CoreError, CoreResult, LedgerDataProvider};
use trip_domain::Trip;
use uuid::Uuid;

const TRIP_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON snapshots, one file per trip.
#[derive(Debug, Clone)]
pub struct JsonTripStore {
    trips_dir: PathBuf,
}

impl JsonTripStore {
    pub fn new(trips_dir: PathBuf) -> CoreResult<Self> {
        fs::create_dir_all(&trips_dir)?;
        Ok(Self { trips_dir })
    }

    /// Store rooted at `<root>/trips`.
    pub fn with_root(root: &Path) -> CoreResult<Self> {
        Self::new(root.join("trips"))
    }

    pub fn trips_dir(&self) -> &Path {
        &self.trips_dir
    }

    pub fn trip_path(&self, name: &str) -> PathBuf {
        self.trips_dir
            .join(format!("{}.{}", canonical_name(name), TRIP_EXTENSION))
    }

    /// Writes the trip under the slug of its name, replacing any earlier copy
    /// of the same trip. A different trip already holding that slug keeps it,
    /// and this one is stored as `<slug>_<short id>` instead.
    pub fn save_trip(&self, trip: &Trip) -> CoreResult<PathBuf> {
        let path = self.slot_for(trip);
        save_trip_to_path(trip, &path)?;
        info!(trip = %trip.id, path = %path.display(), "trip saved");
        Ok(path)
    }

    /// Slug the trip is (or would be) stored under.
    pub fn stored_slug(&self, trip: &Trip) -> String {
        self.slot_for(trip)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| canonical_name(&trip.name))
    }

    pub fn delete_trip(&self, key: &str) -> CoreResult<()> {
        let path = self.resolve_path(key)?;
        fs::remove_file(&path)?;
        info!(path = %path.display(), "trip deleted");
        Ok(())
    }

    /// Reads a snapshot from anywhere on disk and stores it.
    pub fn import_from_path(&self, path: &Path) -> CoreResult<Trip> {
        let trip = load_trip_from_path(path)?;
        for warning in trip_warnings(&trip) {
            warn!(trip = %trip.id, "{warning}");
        }
        self.save_trip(&trip)?;
        Ok(trip)
    }

    pub fn export_to_path(&self, key: &str, path: &Path) -> CoreResult<Trip> {
        let trip = self.load_trip(key)?;
        save_trip_to_path(&trip, path)?;
        info!(trip = %trip.id, path = %path.display(), "trip exported");
        Ok(trip)
    }

    /// One row per readable snapshot. Unreadable files are skipped, and trips
    /// whose balances cannot be computed are listed without totals.
    pub fn list_trip_metadata(&self) -> CoreResult<Vec<TripMetadata>> {
        let mut entries = Vec::new();
        for slug in self.list_trips()? {
            let path = self.trip_path(&slug);
            let trip = match load_trip_from_path(&path) {
                Ok(trip) => trip,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable trip");
                    continue;
                }
            };
            let totals = match BalanceService::compute_trip_balances(&trip) {
                Ok(sheet) => Some(sheet.totals),
                Err(err) => {
                    warn!(trip = %trip.id, error = %err, "trip totals unavailable");
                    None
                }
            };
            entries.push(TripMetadata {
                slug,
                id: trip.id,
                name: trip.name.clone(),
                path,
                created_at: trip.created_at,
                member_count: trip.members.len(),
                budget_item_count: trip.budget_items.len(),
                spending_item_count: trip.spending_items.len(),
                total_budgeted: totals.as_ref().map(|totals| totals.total_budgeted),
                total_spent: totals.as_ref().map(|totals| totals.total_spent),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn slot_for(&self, trip: &Trip) -> PathBuf {
        let base = self.trip_path(&trip.name);
        let alternate = self.trips_dir.join(format!(
            "{}_{}.{}",
            canonical_name(&trip.name),
            short_id(trip.id),
            TRIP_EXTENSION
        ));
        if holds_trip(&base, trip.id) {
            base
        } else if holds_trip(&alternate, trip.id) {
            alternate
        } else if base.exists() {
            warn!(
                trip = %trip.id,
                slug = %canonical_name(&trip.name),
                "slug taken by another trip; storing under an id suffix"
            );
            alternate
        } else {
            base
        }
    }

    /// Exact slug first, then a scan for a matching id or name.
    fn resolve_path(&self, key: &str) -> CoreResult<PathBuf> {
        let needle = key.trim();
        let direct = self.trips_dir.join(format!("{needle}.{TRIP_EXTENSION}"));
        if canonical_name(needle) == needle && direct.is_file() {
            return Ok(direct);
        }
        let id = Uuid::parse_str(needle).ok();
        for slug in self.list_trips()? {
            let path = self.trip_path(&slug);
            let Ok(trip) = load_trip_from_path(&path) else {
                continue;
            };
            if Some(trip.id) == id || trip.name.eq_ignore_ascii_case(needle) {
                return Ok(path);
            }
        }
        Err(CoreError::TripNotFound(needle.to_string()))
    }
}

impl LedgerDataProvider for JsonTripStore {
    fn load_trip(&self, key: &str) -> CoreResult<Trip> {
        let path = self.resolve_path(key)?;
        let trip = load_trip_from_path(&path)?;
        info!(trip = %trip.id, path = %path.display(), "trip loaded");
        Ok(trip)
    }

    fn list_trips(&self) -> CoreResult<Vec<String>> {
        if !self.trips_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.trips_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(TRIP_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Saves a trip to an arbitrary path on disk.
pub fn save_trip_to_path(trip: &Trip, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_trip(trip)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a trip from the provided filesystem path.
pub fn load_trip_from_path(path: &Path) -> CoreResult<Trip> {
    if !path.exists() {
        return Err(CoreError::Storage(format!(
            "no trip snapshot at `{}`",
            path.display()
        )));
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

#[derive(Debug, Clone)]
pub struct TripMetadata {
    pub slug: String,
    pub id: Uuid,
    pub name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub member_count: usize,
    pub budget_item_count: usize,
    pub spending_item_count: usize,
    /// `None` when the snapshot's items cannot be balanced.
    pub total_budgeted: Option<f64>,
    pub total_spent: Option<f64>,
}

/// File-system safe slug for a trip name.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "trip".into()
    } else {
        sanitized
    }
}

fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

fn holds_trip(path: &Path, id: Uuid) -> bool {
    path.is_file() && load_trip_from_path(path).is_ok_and(|stored| stored.id == id)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> CoreResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_trip(trip: &Trip) -> CoreResult<String> {
    serde_json::to_string_pretty(trip).map_err(|err| CoreError::Serde(err.to_string()))
}
