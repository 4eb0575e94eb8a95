pub mod helpers;

pub mod assets;
pub mod compute;
pub mod dashboard;
pub mod identity;
pub mod images;
pub mod instances;
pub mod networks;
pub mod tenants;
pub mod volumes;

pub use assets::stylesheet_get;
pub use compute::{compute_create, compute_get, vm_delete, vm_detail};
pub use dashboard::{dashboard_get, root_get};
pub use identity::{
    domain_delete, domains_create, domains_get, user_delete, user_disable, user_enable,
    users_create, users_get,
};
pub use images::{image_delete, images_create, images_get};
pub use instances::{
    instance_delete, instance_reboot, instance_start, instance_stop, instances_create,
    instances_get,
};
pub use networks::{network_delete, networks_create, networks_get};
pub use tenants::{
    project_delete, project_disable, project_enable, projects_create, projects_get, role_delete,
    roles_create, roles_get,
};
pub use volumes::{volume_attach, volume_delete, volume_detach, volumes_create, volumes_get};
