// Shared state
pub mod app_state;
pub mod flash;
pub mod views;

// Wire shapes
pub mod envelope;
pub mod validation;

// Resources
pub mod vm;
pub mod instance;
pub mod network;
pub mod volume;
pub mod image;
pub mod identity;
pub mod tenant;

pub use app_state::AppState;
pub use flash::{Flash, FlashKind};
pub use views::{
    ActionView, CardView, CellView, FieldKind, FieldView, FormView, OptionView, RowView, TableView,
};
pub use envelope::{ApiErrorBody, Envelope};
pub use validation::ValidationError;
pub use vm::{Vm, VmCreateRequest, VmListResponse, VmPhase, VmStatus, CPU_OPTIONS, DEFAULT_VM_IMAGE, MEMORY_OPTIONS};
pub use instance::{CreateInstanceRequest, Flavor, Instance, PowerAction, FLAVORS};
pub use network::{CreateNetworkRequest, Network};
pub use volume::{
    AttachVolumeRequest, CreateVolumeRequest, Volume, VolumeAttachment, AVAILABILITY_ZONES,
    DEFAULT_ATTACH_DEVICE, VOLUME_TYPES,
};
pub use image::{CreateImageRequest, Image, CONTAINER_FORMATS, DISK_FORMATS, VISIBILITIES};
pub use identity::{CreateDomainRequest, CreateUserRequest, Domain, UpdateDomainRequest, UpdateUserRequest, User};
pub use tenant::{CreateProjectRequest, CreateRoleRequest, Project, Role, UpdateProjectRequest, UpdateRoleRequest};
