use crate::backend::domain::commands::region::{
    CreateMajlisCommand, SaveRegionCommand, UpdateMajlisCommand,
};
use crate::backend::domain::models::region::{Majlis, Region, RegionWithMajlis};
use shared::{
    CreateMajlisRequest, Majlis as SharedMajlis, MajlisResponse, Region as SharedRegion,
    RegionListResponse, RegionResponse, RegionWithMajlis as SharedRegionWithMajlis,
    SaveRegionRequest, UpdateMajlisRequest,
};

/// Mapper between region/majlis DTOs and domain models.
pub struct RegionMapper;

impl RegionMapper {
    pub fn region_to_dto(region: Region) -> SharedRegion {
        SharedRegion {
            id: region.id,
            name: region.name,
            code: region.code,
        }
    }

    pub fn majlis_to_dto(majlis: Majlis) -> SharedMajlis {
        SharedMajlis {
            id: majlis.id,
            region_id: majlis.region_id,
            name: majlis.name,
            code: majlis.code,
        }
    }

    pub fn to_list_dto(regions: Vec<RegionWithMajlis>) -> RegionListResponse {
        RegionListResponse {
            regions: regions
                .into_iter()
                .map(|entry| SharedRegionWithMajlis {
                    id: entry.region.id,
                    name: entry.region.name,
                    code: entry.region.code,
                    majlis: entry.majlis.into_iter().map(Self::majlis_to_dto).collect(),
                })
                .collect(),
        }
    }

    pub fn to_save_region_command(request: SaveRegionRequest) -> SaveRegionCommand {
        SaveRegionCommand {
            name: request.name,
            code: request.code,
        }
    }

    pub fn to_create_majlis_command(request: CreateMajlisRequest) -> CreateMajlisCommand {
        CreateMajlisCommand {
            name: request.name,
            region_id: request.region_id,
            code: request.code,
        }
    }

    pub fn to_update_majlis_command(request: UpdateMajlisRequest) -> UpdateMajlisCommand {
        UpdateMajlisCommand {
            name: request.name,
            code: request.code,
        }
    }

    pub fn to_region_response(region: Region) -> RegionResponse {
        RegionResponse {
            success: true,
            region: Self::region_to_dto(region),
        }
    }

    pub fn to_majlis_response(majlis: Majlis) -> MajlisResponse {
        MajlisResponse {
            success: true,
            majlis: Self::majlis_to_dto(majlis),
        }
    }
}
