//! gRPC gateway for the catalogue service.
//!
//! Implements `girder.v1.CatalogService` over the same shared catalogue and
//! stock-lookup collaborator as the HTTP gateway. Negative results ("beam not
//! found", "lookup failed") are successful responses carrying a flag, never
//! transport-level `Status` faults; `Status` is reserved for malformed
//! requests and internal store failures.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tonic::{Request, Response, Status};

use girder_core::catalog::Catalog;
use girder_core::section::Beam;
use girder_core::Error;
use girder_proto::v1::catalog_service_server::{CatalogService, CatalogServiceServer};
use girder_proto::v1::{
    Beam as ProtoBeam, CreateBeamRequest, CreateBeamResponse, DeleteBeamRequest,
    DeleteBeamResponse, GetBeamRequest, GetBeamResponse, GetStockStatusRequest,
    GetStockStatusResponse, ListBeamsRequest, ListBeamsResponse, UpdateBeamRequest,
    UpdateBeamResponse,
};

use crate::stock_client::StockLookup;

/// The catalogue gRPC service.
pub struct CatalogGrpc {
    catalog: Arc<Catalog>,
    stock: Arc<dyn StockLookup>,
}

impl CatalogGrpc {
    /// Creates a service over the shared catalogue and stock collaborator.
    pub fn new(catalog: Arc<Catalog>, stock: Arc<dyn StockLookup>) -> Self {
        Self { catalog, stock }
    }
}

/// Maps a store failure onto a generic internal `Status`, keeping the detail
/// in the logs.
fn store_status(error: &Error) -> Status {
    tracing::error!(detail = %error, "catalogue store failure");
    Status::internal("internal error")
}

fn beam_to_proto(beam: Beam) -> ProtoBeam {
    ProtoBeam {
        section_designation: beam.section_designation,
        mass_per_metre: beam.mass_per_metre,
        depth_of_section: beam.depth_of_section,
        width_of_section: beam.width_of_section,
        thickness_web: beam.thickness_web,
        thickness_flange: beam.thickness_flange,
        root_radius: beam.root_radius,
        depth_between_fillets: beam.depth_between_fillets,
        ratios_for_local_buckling_web: beam.ratios_for_local_buckling_web,
        ratios_for_local_buckling_flange: beam.ratios_for_local_buckling_flange,
        end_clearance: beam.end_clearance,
        notch: beam.notch,
        dimensions_for_detailing_n: beam.dimensions_for_detailing_n,
        surface_area_per_metre: beam.surface_area_per_metre,
        surface_area_per_tonne: beam.surface_area_per_tonne,
        second_moment_of_area_axis_y: beam.second_moment_of_area_axis_y,
        second_moment_of_area_axis_z: beam.second_moment_of_area_axis_z,
        radius_of_gyration_axis_y: beam.radius_of_gyration_axis_y,
        radius_of_gyration_axis_z: beam.radius_of_gyration_axis_z,
        elastic_modulus_axis_y: beam.elastic_modulus_axis_y,
        elastic_modulus_axis_z: beam.elastic_modulus_axis_z,
        plastic_modulus_axis_y: beam.plastic_modulus_axis_y,
        plastic_modulus_axis_z: beam.plastic_modulus_axis_z,
        buckling_parameter: beam.buckling_parameter,
        torsional_index: beam.torsional_index,
        warping_constant: beam.warping_constant,
        torsional_constant: beam.torsional_constant,
        area_of_section: beam.area_of_section,
    }
}

fn beam_from_proto(beam: ProtoBeam) -> Beam {
    Beam {
        section_designation: beam.section_designation,
        mass_per_metre: beam.mass_per_metre,
        depth_of_section: beam.depth_of_section,
        width_of_section: beam.width_of_section,
        thickness_web: beam.thickness_web,
        thickness_flange: beam.thickness_flange,
        root_radius: beam.root_radius,
        depth_between_fillets: beam.depth_between_fillets,
        ratios_for_local_buckling_web: beam.ratios_for_local_buckling_web,
        ratios_for_local_buckling_flange: beam.ratios_for_local_buckling_flange,
        end_clearance: beam.end_clearance,
        notch: beam.notch,
        dimensions_for_detailing_n: beam.dimensions_for_detailing_n,
        surface_area_per_metre: beam.surface_area_per_metre,
        surface_area_per_tonne: beam.surface_area_per_tonne,
        second_moment_of_area_axis_y: beam.second_moment_of_area_axis_y,
        second_moment_of_area_axis_z: beam.second_moment_of_area_axis_z,
        radius_of_gyration_axis_y: beam.radius_of_gyration_axis_y,
        radius_of_gyration_axis_z: beam.radius_of_gyration_axis_z,
        elastic_modulus_axis_y: beam.elastic_modulus_axis_y,
        elastic_modulus_axis_z: beam.elastic_modulus_axis_z,
        plastic_modulus_axis_y: beam.plastic_modulus_axis_y,
        plastic_modulus_axis_z: beam.plastic_modulus_axis_z,
        buckling_parameter: beam.buckling_parameter,
        torsional_index: beam.torsional_index,
        warping_constant: beam.warping_constant,
        torsional_constant: beam.torsional_constant,
        area_of_section: beam.area_of_section,
    }
}

#[tonic::async_trait]
impl CatalogService for CatalogGrpc {
    async fn list_beams(
        &self,
        _request: Request<ListBeamsRequest>,
    ) -> Result<Response<ListBeamsResponse>, Status> {
        let beams = self.catalog.list().map_err(|e| store_status(&e))?;

        Ok(Response::new(ListBeamsResponse {
            beams: beams.into_iter().map(beam_to_proto).collect(),
        }))
    }

    async fn get_beam(
        &self,
        request: Request<GetBeamRequest>,
    ) -> Result<Response<GetBeamResponse>, Status> {
        let designation = request.into_inner().section_designation;

        let beam = self
            .catalog
            .get(&designation)
            .map_err(|e| store_status(&e))?;

        Ok(Response::new(match beam {
            Some(beam) => GetBeamResponse {
                beam: Some(beam_to_proto(beam)),
                found: true,
            },
            None => GetBeamResponse {
                beam: None,
                found: false,
            },
        }))
    }

    async fn create_beam(
        &self,
        request: Request<CreateBeamRequest>,
    ) -> Result<Response<CreateBeamResponse>, Status> {
        let Some(proto_beam) = request.into_inner().beam else {
            return Ok(Response::new(CreateBeamResponse {
                beam: None,
                success: false,
                message: "beam is required".to_string(),
            }));
        };

        let beam = beam_from_proto(proto_beam);
        tracing::info!(designation = %beam.section_designation, "creating beam");

        self.catalog
            .insert(beam.clone())
            .map_err(|e| store_status(&e))?;

        Ok(Response::new(CreateBeamResponse {
            beam: Some(beam_to_proto(beam)),
            success: true,
            message: "beam created".to_string(),
        }))
    }

    async fn update_beam(
        &self,
        request: Request<UpdateBeamRequest>,
    ) -> Result<Response<UpdateBeamResponse>, Status> {
        let request = request.into_inner();
        let Some(proto_beam) = request.beam else {
            return Err(Status::invalid_argument("beam is required"));
        };

        let designation = request.section_designation;
        tracing::info!(designation = %designation, "replacing beam");

        let replaced = self
            .catalog
            .replace(&designation, beam_from_proto(proto_beam))
            .map_err(|e| store_status(&e))?;

        Ok(Response::new(match replaced {
            Some(beam) => UpdateBeamResponse {
                beam: Some(beam_to_proto(beam)),
                found: true,
            },
            None => UpdateBeamResponse {
                beam: None,
                found: false,
            },
        }))
    }

    async fn delete_beam(
        &self,
        request: Request<DeleteBeamRequest>,
    ) -> Result<Response<DeleteBeamResponse>, Status> {
        let designation = request.into_inner().section_designation;
        tracing::info!(designation = %designation, "deleting beam");

        let found = self
            .catalog
            .remove(&designation)
            .map_err(|e| store_status(&e))?;

        Ok(Response::new(DeleteBeamResponse { found }))
    }

    async fn get_stock_status(
        &self,
        request: Request<GetStockStatusRequest>,
    ) -> Result<Response<GetStockStatusResponse>, Status> {
        let request = request.into_inner();
        tracing::debug!(
            product_id = %request.product_id,
            postcode = %request.postcode,
            "checking stock"
        );

        // A failed lookup is a negative result, not an RPC fault.
        let response = match self
            .stock
            .check_stock(&request.product_id, &request.postcode)
            .await
        {
            Ok(status) => GetStockStatusResponse {
                product_id: request.product_id,
                postcode: request.postcode,
                status: status.as_str().to_string(),
                success: true,
                message: String::new(),
            },
            Err(error) => {
                tracing::warn!(detail = %error, "stock lookup failed");
                GetStockStatusResponse {
                    product_id: request.product_id,
                    postcode: request.postcode,
                    status: String::new(),
                    success: false,
                    message: "stock lookup failed".to_string(),
                }
            }
        };

        Ok(Response::new(response))
    }
}

/// Serves the gRPC gateway on `0.0.0.0:port` until the task is dropped.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the transport fails.
pub async fn serve(
    port: u16,
    catalog: Arc<Catalog>,
    stock: Arc<dyn StockLookup>,
) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let service = CatalogGrpc::new(catalog, stock);

    tracing::info!(%addr, "gRPC server listening");

    tonic::transport::Server::builder()
        .add_service(CatalogServiceServer::new(service))
        .serve(addr)
        .await?;

    Ok(())
}
