//! ESP32 clock adapter.
//!
//! Implements [`Clock`] for the actuator control loop.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (monotonic) and `localtime_r()` for the
//!   time of day (SNTP-synced, honours the `TZ` environment variable).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` and the
//!   UTC time of day from `SystemTime` for host-side runs.

use crate::app::ports::{Clock, WallTime};

/// Reject obviously unsynced time (before 2020-01-01).
pub const EPOCH_2020: i64 = 1_577_836_800;

/// Clock adapter for the ESP32 platform.
pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

/// UTC time of day for a Unix timestamp, `None` before [`EPOCH_2020`].
pub fn utc_time_of_day(unix_secs: i64) -> Option<WallTime> {
    if unix_secs < EPOCH_2020 {
        return None;
    }
    let secs_of_day = unix_secs.rem_euclid(86_400);
    Some(WallTime {
        hour: (secs_of_day / 3600) as u8,
        minute: (secs_of_day / 60 % 60) as u8,
    })
}

impl Clock for SystemClock {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_os = "espidf")]
    fn wall_time(&self) -> Option<WallTime> {
        use core::ptr;
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, ptr::null_mut()) } != 0 {
            return None;
        }
        if i64::from(tv.tv_sec) < EPOCH_2020 {
            return None;
        }
        let secs = tv.tv_sec as esp_idf_svc::sys::time_t;
        let mut tm: esp_idf_svc::sys::tm = unsafe { core::mem::zeroed() };
        if unsafe { esp_idf_svc::sys::localtime_r(&secs, &mut tm) }.is_null() {
            return None;
        }
        if !(0..=23).contains(&tm.tm_hour) || !(0..=59).contains(&tm.tm_min) {
            return None;
        }
        Some(WallTime {
            hour: tm.tm_hour as u8,
            minute: tm.tm_min as u8,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn wall_time(&self) -> Option<WallTime> {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .ok()?
            .as_secs();
        utc_time_of_day(i64::try_from(secs).ok()?)
    }
}
