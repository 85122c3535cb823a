use serde::{Deserialize, Serialize};
use chrono::{NaiveTime, TimeDelta};
use skyhigh_core::CabinClass;
use std::fmt;

/// Block time of a flight, split the way offer cards show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl FlightDuration {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    pub fn as_time_delta(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.hours)) + TimeDelta::minutes(i64::from(self.minutes))
    }
}

impl fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// A synthetic flight result shown to the visitor.
///
/// Times are times of day only. Arrival wraps past midnight without any date
/// or timezone correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    pub carrier: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration: FlightDuration,
    pub origin: String,
    pub destination: String,
    /// Per passenger, whole dollars
    pub price: u32,
    pub cabin_class: CabinClass,
    pub stops: u8,
}

impl FlightOffer {
    /// "Direct" for nonstop flights, otherwise "N stop".
    pub fn stop_label(&self) -> String {
        match self.stops {
            0 => "Direct".to_string(),
            n => format!("{} stop", n),
        }
    }

    pub fn total_for(&self, passengers: u32) -> u64 {
        u64::from(self.price) * u64::from(passengers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(price: u32, stops: u8) -> FlightOffer {
        FlightOffer {
            id: "flight-0".to_string(),
            carrier: "Emirates".to_string(),
            departure_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
            duration: FlightDuration::new(7, 30),
            origin: "DXB".to_string(),
            destination: "LHR".to_string(),
            price,
            cabin_class: CabinClass::First,
            stops,
        }
    }

    #[test]
    fn test_stop_label() {
        assert_eq!(offer(2500, 0).stop_label(), "Direct");
        assert_eq!(offer(2500, 1).stop_label(), "1 stop");
    }

    #[test]
    fn test_total_for_passengers() {
        assert_eq!(offer(1450, 0).total_for(3), 4350);
        assert_eq!(offer(1450, 0).total_for(1), 1450);
    }

    #[test]
    fn test_duration_display() {
        let d = FlightDuration::new(12, 5);
        assert_eq!(d.to_string(), "12h 5m");
        assert_eq!(d.as_time_delta().num_minutes(), 725);
    }
}
