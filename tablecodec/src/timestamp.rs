//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use crate::{CodecError, CodecResult};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// A `T` field value.
///
/// # Format
/// Two big-endian signed 32-bit integers: seconds since the Unix epoch followed by
/// nanoseconds. This is **not** the AMQP 0-9-1 timestamp, which is a single 64-bit count of
/// seconds. Peers of this codec expect the two-field layout, so both fields are kept
/// exactly as read, even when the nanosecond field is outside `0..1_000_000_000`.
///
/// # Example
/// ```
/// use amqptable_codec::Timestamp;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let ts = Timestamp::new(1_700_000_000, 500);
/// assert_eq!(
///     ts.to_system_time(),
///     UNIX_EPOCH + Duration::new(1_700_000_000, 500)
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Timestamp {
    /// Seconds since the Unix epoch
    pub seconds: i32,
    /// Nanoseconds added to `seconds`
    pub nanoseconds: i32,
}

impl Timestamp {
    /// Creates a timestamp from its two wire fields.
    pub fn new(seconds: i32, nanoseconds: i32) -> Self {
        Timestamp {
            seconds,
            nanoseconds,
        }
    }

    /// Converts a `SystemTime`, keeping nanosecond precision.
    ///
    /// # Errors
    /// Returns [`CodecError::TimestampOutOfRange`] when the seconds do not fit in an `i32`.
    pub fn from_system_time(time: SystemTime) -> CodecResult<Self> {
        let (seconds, nanoseconds) = match time.duration_since(UNIX_EPOCH) {
            Ok(since) => (since.as_secs() as i64, since.subsec_nanos() as i64),
            Err(err) => {
                let before = err.duration();
                let mut seconds = -(before.as_secs() as i64);
                let mut nanoseconds = before.subsec_nanos() as i64;
                if nanoseconds > 0 {
                    seconds -= 1;
                    nanoseconds = NANOS_PER_SEC - nanoseconds;
                }
                (seconds, nanoseconds)
            }
        };
        let seconds =
            i32::try_from(seconds).map_err(|_| CodecError::TimestampOutOfRange(seconds))?;
        Ok(Timestamp::new(seconds, nanoseconds as i32))
    }

    /// Converts to a `SystemTime`.
    ///
    /// Out of range nanoseconds carry into the seconds, so `(10, -1)` is one nanosecond
    /// before the tenth second.
    pub fn to_system_time(&self) -> SystemTime {
        let nanos = self.nanoseconds as i64;
        let seconds = self.seconds as i64 + nanos.div_euclid(NANOS_PER_SEC);
        let subsec = Duration::from_nanos(nanos.rem_euclid(NANOS_PER_SEC) as u64);
        if seconds >= 0 {
            UNIX_EPOCH + Duration::from_secs(seconds as u64) + subsec
        } else {
            UNIX_EPOCH - Duration::from_secs(seconds.unsigned_abs()) + subsec
        }
    }
}

impl From<Timestamp> for SystemTime {
    fn from(value: Timestamp) -> Self {
        value.to_system_time()
    }
}

impl TryFrom<SystemTime> for Timestamp {
    type Error = CodecError;

    fn try_from(value: SystemTime) -> Result<Self, Self::Error> {
        Timestamp::from_system_time(value)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s+{}ns", self.seconds, self.nanoseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_after_epoch() {
        let time = UNIX_EPOCH + Duration::new(1_234, 5_678);
        let ts = Timestamp::from_system_time(time).unwrap();
        assert_eq!(ts, Timestamp::new(1_234, 5_678));
        assert_eq!(ts.to_system_time(), time);
    }

    #[test]
    fn test_system_time_before_epoch() {
        let time = UNIX_EPOCH - Duration::new(1, 250_000_000);
        let ts = Timestamp::from_system_time(time).unwrap();
        assert_eq!(ts, Timestamp::new(-2, 750_000_000));
        assert_eq!(ts.to_system_time(), time);
    }

    #[test]
    fn test_nanoseconds_carry() {
        let ts = Timestamp::new(10, -1);
        assert_eq!(
            ts.to_system_time(),
            UNIX_EPOCH + Duration::new(9, 999_999_999)
        );
        let ts = Timestamp::new(0, 2_500_000_000u32 as i32);
        assert_eq!(
            ts.to_system_time(),
            UNIX_EPOCH - Duration::new(1, 794_967_296)
        );
    }

    #[test]
    fn test_out_of_range() {
        let time = UNIX_EPOCH + Duration::from_secs(i32::MAX as u64 + 1);
        let err = Timestamp::from_system_time(time).unwrap_err();
        assert_eq!(err, CodecError::TimestampOutOfRange(i32::MAX as i64 + 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Timestamp::new(30, 5).to_string(), "30s+5ns");
    }
}
