//! Aggregation over academic records: yes/no percentages, numeric
//! averages, month grouping and the latest-record snapshot.

use std::cmp::Ordering;

use crate::backend::domain::models::academic::{AcademicRecord, ReportMonth};

/// Whole percentage of `count` out of `total`, 0 for an empty population
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

/// Yes/no knowledge questions on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeFlag {
    KnowsPrayerFull,
    KnowsPrayerMeaning,
    CanReadQuran,
    OwnsBicycle,
}

impl KnowledgeFlag {
    pub const ALL: [KnowledgeFlag; 4] = [
        KnowledgeFlag::KnowsPrayerFull,
        KnowledgeFlag::KnowsPrayerMeaning,
        KnowledgeFlag::CanReadQuran,
        KnowledgeFlag::OwnsBicycle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KnowledgeFlag::KnowsPrayerFull => "Prayer Knowledge",
            KnowledgeFlag::KnowsPrayerMeaning => "Prayer Meaning",
            KnowledgeFlag::CanReadQuran => "Quran Reading",
            KnowledgeFlag::OwnsBicycle => "Bicycle",
        }
    }

    pub fn value(&self, record: &AcademicRecord) -> bool {
        match self {
            KnowledgeFlag::KnowsPrayerFull => record.knows_prayer_full,
            KnowledgeFlag::KnowsPrayerMeaning => record.knows_prayer_meaning,
            KnowledgeFlag::CanReadQuran => record.can_read_quran,
            KnowledgeFlag::OwnsBicycle => record.owns_bicycle,
        }
    }
}

/// Optional numeric answers on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    AvgPrayersPerDay,
    DaysTilawatDone,
    FridayPrayersAttended,
    HuzurSermonsListened,
    NafliFasts,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::AvgPrayersPerDay,
        NumericField::DaysTilawatDone,
        NumericField::FridayPrayersAttended,
        NumericField::HuzurSermonsListened,
        NumericField::NafliFasts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NumericField::AvgPrayersPerDay => "Daily Prayers",
            NumericField::DaysTilawatDone => "Tilawat Days",
            NumericField::FridayPrayersAttended => "Friday Prayers",
            NumericField::HuzurSermonsListened => "Huzur Sermons",
            NumericField::NafliFasts => "Nafli Fasts",
        }
    }

    pub fn value(&self, record: &AcademicRecord) -> Option<u32> {
        match self {
            NumericField::AvgPrayersPerDay => record.avg_prayers_per_day.map(u32::from),
            NumericField::DaysTilawatDone => record.days_tilawat_done.map(u32::from),
            NumericField::FridayPrayersAttended => record.friday_prayers_attended.map(u32::from),
            NumericField::HuzurSermonsListened => record.huzur_sermons_listened.map(u32::from),
            NumericField::NafliFasts => record.nafli_fasts,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlagStatistic {
    pub flag: KnowledgeFlag,
    pub true_count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericStatistic {
    pub field: NumericField,
    pub reported_count: usize,
    pub average: Option<f64>,
}

pub fn flag_statistics(records: &[AcademicRecord]) -> Vec<FlagStatistic> {
    KnowledgeFlag::ALL
        .iter()
        .map(|flag| {
            let true_count = records.iter().filter(|r| flag.value(r)).count();
            FlagStatistic {
                flag: *flag,
                true_count,
                percentage: percentage(true_count, records.len()),
            }
        })
        .collect()
}

/// Mean over the records that reported a value; absent values are skipped,
/// not counted as zero
pub fn numeric_statistics(records: &[AcademicRecord]) -> Vec<NumericStatistic> {
    NumericField::ALL
        .iter()
        .map(|field| {
            let values: Vec<u32> = records.iter().filter_map(|r| field.value(r)).collect();
            let average = if values.is_empty() {
                None
            } else {
                Some(values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64)
            };
            NumericStatistic {
                field: *field,
                reported_count: values.len(),
                average,
            }
        })
        .collect()
}

/// Sort key for a stored month. Unknown names rank after December.
pub fn month_rank(month: &str) -> usize {
    ReportMonth::parse(month)
        .map(|m| m.index())
        .unwrap_or(ReportMonth::ALL.len())
}

pub fn compare_months(a: &str, b: &str) -> Ordering {
    month_rank(a)
        .cmp(&month_rank(b))
        .then_with(|| {
            if month_rank(a) == ReportMonth::ALL.len() {
                a.cmp(b)
            } else {
                Ordering::Equal
            }
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub month: String,
    pub records: Vec<AcademicRecord>,
}

/// Groups one participant's records by month in calendar order.
///
/// Records keep their input order inside each group.
pub fn group_by_month(records: &[AcademicRecord], participant_id: &str) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for record in records.iter().filter(|r| r.participant_id == participant_id) {
        match groups.iter_mut().find(|g| g.month == record.report_month) {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(MonthGroup {
                month: record.report_month.clone(),
                records: vec![record.clone()],
            }),
        }
    }
    // stable, so equal keys keep first-seen order
    groups.sort_by(|a, b| compare_months(&a.month, &b.month));
    groups
}

/// Record with the greatest `created_at`; ties go to the later record
pub fn latest_record<'a>(
    records: &'a [AcademicRecord],
    participant_id: &str,
) -> Option<&'a AcademicRecord> {
    records
        .iter()
        .filter(|r| r.participant_id == participant_id)
        .max_by_key(|r| r.created_at)
}
