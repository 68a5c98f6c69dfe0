use crate::backend::domain::academic_report::{FlagStatistic, MonthGroup, NumericStatistic};
use crate::backend::domain::commands::academic::{
    AcademicRecordDetails, AcademicStatisticsResult, ParticipantAcademicHistory,
    SaveAcademicRecordCommand,
};
use crate::backend::domain::filters::AcademicFilter;
use crate::backend::domain::models::academic::AcademicRecord;
use shared::{
    AcademicListQuery, AcademicRecord as SharedAcademicRecord, AcademicRecordListResponse,
    AcademicRecordResponse, AcademicStatistics, FlagStat, MonthGroup as SharedMonthGroup,
    NumericFieldStat, ParticipantAcademicView, SaveAcademicRecordRequest,
};

/// Mapper between academic record DTOs and domain types.
pub struct AcademicMapper;

impl AcademicMapper {
    pub fn to_command(request: SaveAcademicRecordRequest) -> SaveAcademicRecordCommand {
        SaveAcademicRecordCommand {
            participant_id: request.participant_id,
            report_month: request.report_month,
            knows_prayer_full: request.knows_prayer_full,
            knows_prayer_meaning: request.knows_prayer_meaning,
            can_read_quran: request.can_read_quran,
            owns_bicycle: request.owns_bicycle,
            avg_prayers_per_day: request.avg_prayers_per_day,
            days_tilawat_done: request.days_tilawat_done,
            friday_prayers_attended: request.friday_prayers_attended,
            huzur_sermons_listened: request.huzur_sermons_listened,
            nafli_fasts: request.nafli_fasts,
        }
    }

    pub fn to_filter(query: AcademicListQuery) -> AcademicFilter {
        AcademicFilter { search: query.search }
    }

    /// Record DTO with optional participant name and registration number
    pub fn record_to_dto(
        record: AcademicRecord,
        participant_name: Option<String>,
        registration_number: Option<String>,
    ) -> SharedAcademicRecord {
        SharedAcademicRecord {
            id: record.id,
            participant_id: record.participant_id,
            participant_name,
            registration_number,
            report_month: record.report_month,
            knows_prayer_full: record.knows_prayer_full,
            knows_prayer_meaning: record.knows_prayer_meaning,
            can_read_quran: record.can_read_quran,
            owns_bicycle: record.owns_bicycle,
            avg_prayers_per_day: record.avg_prayers_per_day,
            days_tilawat_done: record.days_tilawat_done,
            friday_prayers_attended: record.friday_prayers_attended,
            huzur_sermons_listened: record.huzur_sermons_listened,
            nafli_fasts: record.nafli_fasts,
            created_at: record.created_at.to_rfc3339(),
        }
    }

    pub fn to_dto(details: AcademicRecordDetails) -> SharedAcademicRecord {
        Self::record_to_dto(details.record, details.participant_name, details.registration_number)
    }

    pub fn to_list_dto(records: Vec<AcademicRecordDetails>) -> AcademicRecordListResponse {
        AcademicRecordListResponse {
            records: records.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_response(details: AcademicRecordDetails, message: &str) -> AcademicRecordResponse {
        AcademicRecordResponse {
            record: Self::to_dto(details),
            success_message: message.to_string(),
        }
    }

    fn flag_to_dto(stat: FlagStatistic) -> FlagStat {
        FlagStat {
            label: stat.flag.label().to_string(),
            true_count: stat.true_count,
            percentage: stat.percentage,
        }
    }

    fn numeric_to_dto(stat: NumericStatistic) -> NumericFieldStat {
        NumericFieldStat {
            label: stat.field.label().to_string(),
            reported_count: stat.reported_count,
            average: stat.average,
        }
    }

    pub fn to_statistics_dto(result: AcademicStatisticsResult) -> AcademicStatistics {
        AcademicStatistics {
            total_responses: result.total_responses,
            flags: result.flags.into_iter().map(Self::flag_to_dto).collect(),
            numeric_fields: result.numeric_fields.into_iter().map(Self::numeric_to_dto).collect(),
        }
    }

    /// Monthly view; every record in it belongs to the same participant
    pub fn to_history_dto(history: ParticipantAcademicHistory) -> ParticipantAcademicView {
        let name = history.participant.full_name.clone();
        let number = history.participant.registration_number.clone();
        let with_participant = |record: AcademicRecord| {
            Self::record_to_dto(record, Some(name.clone()), Some(number.clone()))
        };

        let months = history
            .months
            .into_iter()
            .map(|group: MonthGroup| SharedMonthGroup {
                month: group.month,
                records: group.records.into_iter().map(with_participant).collect(),
            })
            .collect();

        ParticipantAcademicView {
            participant_id: history.participant.id,
            participant_name: history.participant.full_name,
            registration_number: history.participant.registration_number,
            months,
            latest: history.latest.map(with_participant),
        }
    }
}
