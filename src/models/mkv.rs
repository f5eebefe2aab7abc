use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct TCOUNT {
    pub title_count: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CINFO {
    pub attribute: i32,
    pub code: i32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TINFO {
    pub title_id: i32,
    pub attribute: i32,
    pub code: i32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SINFO {
    pub title_id: i32,
    pub stream_id: i32,
    pub attribute: i32,
    pub code: i32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PRGV {
    pub current: i32,
    pub total: i32,
    pub pmax: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PRGT {
    pub code: i32,
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PRGC {
    pub code: i32,
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MSG {
    pub code: i32,
    pub flags: i32,
    pub message: String,
}

/// One decoded robot-mode line. DRV and unknown prefixes never decode.
#[derive(Debug, Clone, PartialEq)]
pub enum MkvData {
    TCOUNT(TCOUNT),
    CINFO(CINFO),
    TINFO(TINFO),
    SINFO(SINFO),
    PRGV(PRGV),
    PRGT(PRGT),
    PRGC(PRGC),
    MSG(MSG),
}

/// A progress snapshot from a running rip, built from the latest PRGT/PRGC
/// labels and one PRGV record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub title: String,
    pub channel: String,
    pub current: i32,
    pub total: i32,
    pub max: i32,
}

impl Status {
    /// Progress of the current operation, 0.0 to 100.0.
    pub fn percentage(&self) -> f64 {
        percent_of(self.current, self.max)
    }

    /// Progress of the whole job, 0.0 to 100.0.
    pub fn total_percentage(&self) -> f64 {
        percent_of(self.total, self.max)
    }
}

fn percent_of(value: i32, max: i32) -> f64 {
    if max <= 0 {
        0.0
    } else {
        (f64::from(value) * 100.0 / f64::from(max)).clamp(0.0, 100.0)
    }
}
