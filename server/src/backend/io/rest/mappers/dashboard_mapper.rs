use crate::backend::domain::commands::dashboard::DashboardSnapshot;
use crate::backend::domain::event_progress::Progress;
use crate::backend::io::rest::mappers::contribution_mapper::ContributionMapper;
use shared::{DashboardResponse, EventProgress, ParticipantStats, RegionStat};

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn progress_to_dto(progress: Progress) -> EventProgress {
        EventProgress {
            event_name: progress.event_name,
            current_day_label: progress.current_day_label,
            progress_percentage: progress.percentage,
        }
    }

    pub fn to_dto(snapshot: DashboardSnapshot) -> DashboardResponse {
        let counts = snapshot.participants;
        DashboardResponse {
            participant_stats: ParticipantStats {
                total_participants: counts.total,
                saf_awwal: counts.saf_awwal,
                saf_dom: counts.saf_dom,
                general: counts.general,
                total_regions: counts.total_regions,
            },
            region_stats: snapshot
                .regions
                .into_iter()
                .map(|(name, participants)| RegionStat { name, participants })
                .collect(),
            contribution_stats: ContributionMapper::to_summary_dto(snapshot.contributions),
            event: Self::progress_to_dto(snapshot.progress),
        }
    }
}
