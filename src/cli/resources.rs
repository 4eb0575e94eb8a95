use yansi::Paint;

use firebird::api::HealthProbe;
use firebird::fetch::VmList;
use firebird::models::{
    AttachVolumeRequest, CreateDomainRequest, CreateImageRequest, CreateInstanceRequest,
    CreateNetworkRequest, CreateProjectRequest, CreateRoleRequest, CreateUserRequest,
    CreateVolumeRequest, PowerAction, VmCreateRequest,
};
use firebird::utils::{
    age_since, enabled_label, format_bytes, format_status, resource_status_class, vm_status_class,
};

use super::output::{new_table, or_dash, print_record, print_table, status_cell, success};
use super::{
    CliError, Context, DomainCommands, ImageCommands, InstanceCommands, NetworkCommands,
    ProjectCommands, RoleCommands, UserCommands, VmCommands, VolumeCommands,
};

fn age(created_at: Option<&str>) -> String {
    created_at.map(age_since).unwrap_or_else(|| "-".to_string())
}

pub async fn check_config(ctx: &Context) -> Result<(), CliError> {
    let cfg = &ctx.config;
    let mut table = new_table(["Setting", "Value"]);
    table.add_row(vec!["API_BASE_URL".to_string(), cfg.api_base_url.clone()]);
    table.add_row(vec!["VM_API_BASE_URL".to_string(), cfg.vm_api_base_url.clone()]);
    table.add_row(vec![
        "REQUEST_TIMEOUT_SECS".to_string(),
        cfg.request_timeout.as_secs().to_string(),
    ]);
    table.add_row(vec!["DEFAULT_NAMESPACE".to_string(), cfg.default_namespace.clone()]);
    table.add_row(vec!["DEFAULT_PAGE_SIZE".to_string(), cfg.default_page_size.to_string()]);
    println!("\n{table}\n");

    let failures = print_health(ctx).await;
    if failures > 0 {
        return Err(CliError::Message(format!(
            "Configuration appears invalid: {} of {} health probes failed",
            failures,
            HealthProbe::ALL.len()
        )));
    }
    success("Configuration looks valid (all health probes answered)");
    Ok(())
}

pub async fn health(ctx: &Context) -> Result<(), CliError> {
    let failures = print_health(ctx).await;
    if failures > 0 {
        return Err(CliError::Message(format!("{} service(s) unhealthy", failures)));
    }
    Ok(())
}

/// Probe every service concurrently and print one row each. Returns the
/// number of failed probes.
async fn print_health(ctx: &Context) -> usize {
    let client = &ctx.client;
    let (infra, identity, tenants) = futures_util::join!(
        client.probe(HealthProbe::Infrastructure),
        client.probe(HealthProbe::Identity),
        client.probe(HealthProbe::Tenants),
    );
    let mut failures = 0;
    let mut table = new_table(["Service", "Endpoint", "Status", "Message"]);
    for (probe, result) in HealthProbe::ALL.iter().zip([infra, identity, tenants]) {
        let (status, message) = match result {
            Ok(envelope) => (
                status_cell("UP", "badge-success"),
                envelope.message.unwrap_or_else(|| "-".to_string()),
            ),
            Err(e) => {
                failures += 1;
                (status_cell("DOWN", "badge-error"), e.message())
            }
        };
        table.add_row(vec![
            probe.label().into(),
            probe.path().into(),
            status,
            message.into(),
        ]);
    }
    println!("\n{table}\n");
    failures
}

pub async fn vms(ctx: &Context, sub: VmCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    match sub {
        VmCommands::List { namespace, page, page_size } => {
            let namespace = namespace.unwrap_or_else(|| ctx.config.default_namespace.clone());
            let page_size = page_size.unwrap_or(ctx.config.default_page_size);
            let list = VmList::new(client.clone(), &namespace, page_size);
            let state = list.fetch_vms(page).await;
            if let Some(e) = state.error {
                return Err(CliError::Message(format!("Failed to fetch VMs: {}", e)));
            }
            let mut table = new_table(["Name", "Status", "CPU", "Memory", "Image", "IP Address", "Node", "Age"]);
            for vm in &state.vms {
                table.add_row(vec![
                    vm.name.clone().into(),
                    status_cell(vm.status.to_string(), vm_status_class(vm.status)),
                    format!("{} vCPU", vm.cpu_cores).into(),
                    vm.memory.clone().into(),
                    vm.image.clone().into(),
                    or_dash(vm.ip_address.as_ref()).into(),
                    or_dash(vm.node_name.as_ref()).into(),
                    age_since(&vm.created_at).into(),
                ]);
            }
            print_table(&table, &format!("No virtual machines in namespace {}.", namespace));
            let p = &state.pagination;
            let s = &state.stats;
            println!(
                "Page {} ({} per page) · {} total · {} running, {} stopped, {} pending, {} error",
                p.page,
                p.page_size,
                p.total_count,
                s.running.green(),
                s.stopped,
                s.pending.yellow(),
                s.error.red()
            );
        }
        VmCommands::Show { namespace, name } => {
            let vm = client.get_vm(&namespace, &name).await?;
            print_record(&vm);
        }
        VmCommands::Create(args) => {
            let namespace = args.namespace.unwrap_or_else(|| ctx.config.default_namespace.clone());
            let password = args.password.unwrap_or_default();
            let request = VmCreateRequest::new(args.name, namespace, args.cpu, args.memory, args.image)?
                .with_description(args.description)
                .with_labels(args.labels)
                .with_public_ip(!args.no_public_ip)
                .with_password(&password, &password)?;
            let vm = client.create_vm(&request).await?;
            success(format!("VM \"{}\" created successfully", request.name()));
            print_record(&vm);
        }
        VmCommands::Delete { namespace, name } => {
            client.delete_vm(&namespace, &name).await?;
            success(format!("VM \"{}\" deleted successfully", name));
        }
    }
    Ok(())
}

pub async fn instances(ctx: &Context, sub: InstanceCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    let power = |action: PowerAction, id: String| async move {
        client.power_action(&id, action).await?;
        success(format!("Instance \"{}\" {} successfully", id, action.past_tense()));
        Ok::<(), CliError>(())
    };
    match sub {
        InstanceCommands::List => {
            let instances = client.list_instances().await?;
            let mut table = new_table(["ID", "Name", "Status", "Flavor", "Image", "Private IP", "Public IP", "Age"]);
            for inst in &instances {
                let status = inst.status.as_deref().unwrap_or("");
                table.add_row(vec![
                    inst.id.clone().into(),
                    inst.name.clone().into(),
                    status_cell(format_status(status), resource_status_class(status)),
                    or_dash(inst.flavor.as_ref()).into(),
                    or_dash(inst.image.as_ref()).into(),
                    or_dash(inst.private_ip.as_ref()).into(),
                    or_dash(inst.public_ip.as_ref()).into(),
                    age(inst.created_at.as_deref()).into(),
                ]);
            }
            print_table(&table, "No instances.");
        }
        InstanceCommands::Show { id } => print_record(&client.get_instance(&id).await?),
        InstanceCommands::Create { name, flavor, image, network_id } => {
            let request = CreateInstanceRequest::new(name, flavor, image, network_id)?;
            let inst = client.create_instance(&request).await?;
            success(format!("Instance \"{}\" created successfully", request.name()));
            if let Some(inst) = inst {
                print_record(&inst);
            }
        }
        InstanceCommands::Delete { id } => {
            client.delete_instance(&id).await?;
            success(format!("Instance \"{}\" deleted successfully", id));
        }
        InstanceCommands::Start { id } => power(PowerAction::Start, id).await?,
        InstanceCommands::Stop { id } => power(PowerAction::Stop, id).await?,
        InstanceCommands::Reboot { id } => power(PowerAction::Reboot, id).await?,
    }
    Ok(())
}

pub async fn networks(ctx: &Context, sub: NetworkCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    match sub {
        NetworkCommands::List => {
            let networks = client.list_networks().await?;
            let mut table = new_table(["ID", "Name", "Status", "Admin state", "Shared", "Subnets"]);
            for net in &networks {
                let status = net.status.as_deref().unwrap_or("");
                table.add_row(vec![
                    net.id.clone().into(),
                    net.name.clone().into(),
                    status_cell(format_status(status), resource_status_class(status)),
                    match net.admin_state_up {
                        Some(true) => "Up",
                        Some(false) => "Down",
                        None => "-",
                    }
                    .into(),
                    or_dash(net.shared).into(),
                    net.subnet_summary().into(),
                ]);
            }
            print_table(&table, "No networks.");
        }
        NetworkCommands::Show { id } => print_record(&client.get_network(&id).await?),
        NetworkCommands::Create { name, tenant_id, admin_down, shared } => {
            let request = CreateNetworkRequest::new(name)?
                .with_admin_state_up(!admin_down)
                .with_shared(shared)
                .with_tenant_id(tenant_id);
            let net = client.create_network(&request).await?;
            success(format!("Network \"{}\" created successfully", request.name()));
            if let Some(net) = net {
                print_record(&net);
            }
        }
        NetworkCommands::Delete { id } => {
            client.delete_network(&id).await?;
            success(format!("Network \"{}\" deleted successfully", id));
        }
    }
    Ok(())
}

pub async fn volumes(ctx: &Context, sub: VolumeCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    match sub {
        VolumeCommands::List => {
            let volumes = client.list_volumes().await?;
            let mut table = new_table(["ID", "Name", "Status", "Size", "Type", "Zone", "Attached to"]);
            for vol in &volumes {
                let status = vol.status.as_deref().unwrap_or("");
                table.add_row(vec![
                    vol.id.clone().into(),
                    vol.name.clone().into(),
                    status_cell(format_status(status), resource_status_class(status)),
                    or_dash(vol.size.map(|s| format!("{} GB", s))).into(),
                    or_dash(vol.volume_type.as_ref()).into(),
                    or_dash(vol.availability_zone.as_ref()).into(),
                    vol.attachment_summary().into(),
                ]);
            }
            print_table(&table, "No volumes.");
        }
        VolumeCommands::Show { id } => print_record(&client.get_volume(&id).await?),
        VolumeCommands::Create { name, size, volume_type, zone } => {
            let mut request = CreateVolumeRequest::new(name, size)?;
            if let Some(kind) = volume_type {
                request = request.with_volume_type(&kind)?;
            }
            if let Some(zone) = zone {
                request = request.with_availability_zone(&zone)?;
            }
            let vol = client.create_volume(&request).await?;
            success(format!("Volume \"{}\" created successfully", request.name()));
            if let Some(vol) = vol {
                print_record(&vol);
            }
        }
        VolumeCommands::Delete { id } => {
            client.delete_volume(&id).await?;
            success(format!("Volume \"{}\" deleted successfully", id));
        }
        VolumeCommands::Attach { id, instance_id, device } => {
            let request = AttachVolumeRequest::new(instance_id.clone(), device.clone())?;
            client.attach_volume(&id, &request).await?;
            success(format!(
                "Volume \"{}\" attached to instance \"{}\" as {}",
                id, instance_id, device
            ));
        }
        VolumeCommands::Detach { id } => {
            client.detach_volume(&id).await?;
            success(format!("Volume \"{}\" detached successfully", id));
        }
    }
    Ok(())
}

pub async fn images(ctx: &Context, sub: ImageCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    match sub {
        ImageCommands::List => {
            let images = client.list_images().await?;
            let mut table = new_table(["ID", "Name", "Status", "Visibility", "Disk format", "Size"]);
            for img in &images {
                let status = img.status.as_deref().unwrap_or("");
                table.add_row(vec![
                    img.id.clone().into(),
                    img.name.clone().into(),
                    status_cell(format_status(status), resource_status_class(status)),
                    or_dash(img.visibility.as_ref()).into(),
                    or_dash(img.disk_format.as_ref()).into(),
                    or_dash(img.size.map(format_bytes)).into(),
                ]);
            }
            print_table(&table, "No images.");
        }
        ImageCommands::Show { id } => print_record(&client.get_image(&id).await?),
        ImageCommands::Create {
            name,
            disk_format,
            container_format,
            visibility,
            min_disk,
            min_ram,
        } => {
            let request = CreateImageRequest::new(name, &disk_format, &container_format)?
                .with_visibility(&visibility)?
                .with_minimums(min_disk, min_ram)?;
            let img = client.create_image(&request).await?;
            success(format!("Image \"{}\" created successfully", request.name()));
            if let Some(img) = img {
                print_record(&img);
            }
        }
        ImageCommands::Delete { id } => {
            client.delete_image(&id).await?;
            success(format!("Image \"{}\" deleted successfully", id));
        }
    }
    Ok(())
}

pub async fn users(ctx: &Context, sub: UserCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    match sub {
        UserCommands::List => {
            let users = client.list_users().await?;
            let mut table = new_table(["ID", "Name", "Email", "Status", "Domain", "Created"]);
            for user in &users {
                let (label, class) = enabled_label(user.enabled);
                table.add_row(vec![
                    user.id.clone().into(),
                    user.name.clone().into(),
                    or_dash(user.email.as_ref()).into(),
                    status_cell(label, class),
                    or_dash(user.domain_id.as_ref()).into(),
                    age(user.created_at.as_deref()).into(),
                ]);
            }
            print_table(&table, "No users.");
        }
        UserCommands::Show { id } => print_record(&client.get_user(&id).await?),
        UserCommands::Create { name, email, password, domain_id, disabled } => {
            let request = CreateUserRequest::new(name, email, password)?
                .with_domain_id(domain_id)
                .with_enabled(!disabled);
            let user = client.create_user(&request).await?;
            success(format!("User \"{}\" created successfully", request.name()));
            if let Some(user) = user {
                print_record(&user);
            }
        }
        UserCommands::Delete { id } => {
            client.delete_user(&id).await?;
            success(format!("User \"{}\" deleted successfully", id));
        }
        UserCommands::Enable { id } => {
            client.enable_user(&id).await?;
            success(format!("User \"{}\" enabled successfully", id));
        }
        UserCommands::Disable { id } => {
            client.disable_user(&id).await?;
            success(format!("User \"{}\" disabled successfully", id));
        }
    }
    Ok(())
}

pub async fn domains(ctx: &Context, sub: DomainCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    match sub {
        DomainCommands::List => {
            let domains = client.list_domains().await?;
            let mut table = new_table(["ID", "Name", "Description", "Status"]);
            for domain in &domains {
                let (label, class) = enabled_label(domain.enabled);
                table.add_row(vec![
                    domain.id.clone().into(),
                    domain.name.clone().into(),
                    or_dash(domain.description.as_ref()).into(),
                    status_cell(label, class),
                ]);
            }
            print_table(&table, "No domains.");
        }
        DomainCommands::Show { id } => print_record(&client.get_domain(&id).await?),
        DomainCommands::Create { name, description, disabled } => {
            let request = CreateDomainRequest::new(name)?
                .with_description(description)
                .with_enabled(!disabled);
            let domain = client.create_domain(&request).await?;
            success(format!("Domain \"{}\" created successfully", request.name()));
            if let Some(domain) = domain {
                print_record(&domain);
            }
        }
        DomainCommands::Delete { id } => {
            client.delete_domain(&id).await?;
            success(format!("Domain \"{}\" deleted successfully", id));
        }
    }
    Ok(())
}

pub async fn projects(ctx: &Context, sub: ProjectCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    match sub {
        ProjectCommands::List => {
            let projects = client.list_projects().await?;
            let mut table = new_table(["ID", "Name", "Description", "Status", "Domain"]);
            for project in &projects {
                let (label, class) = enabled_label(project.enabled);
                table.add_row(vec![
                    project.id.clone().into(),
                    project.name.clone().into(),
                    or_dash(project.description.as_ref()).into(),
                    status_cell(label, class),
                    or_dash(project.domain_id.as_ref()).into(),
                ]);
            }
            print_table(&table, "No projects.");
        }
        ProjectCommands::Show { id } => print_record(&client.get_project(&id).await?),
        ProjectCommands::Create { name, description, domain_id, disabled } => {
            let request = CreateProjectRequest::new(name)?
                .with_description(description)
                .with_domain_id(domain_id)
                .with_enabled(!disabled);
            let project = client.create_project(&request).await?;
            success(format!("Project \"{}\" created successfully", request.name()));
            if let Some(project) = project {
                print_record(&project);
            }
        }
        ProjectCommands::Delete { id } => {
            client.delete_project(&id).await?;
            success(format!("Project \"{}\" deleted successfully", id));
        }
        ProjectCommands::Enable { id } => {
            client.enable_project(&id).await?;
            success(format!("Project \"{}\" enabled successfully", id));
        }
        ProjectCommands::Disable { id } => {
            client.disable_project(&id).await?;
            success(format!("Project \"{}\" disabled successfully", id));
        }
    }
    Ok(())
}

pub async fn roles(ctx: &Context, sub: RoleCommands) -> Result<(), CliError> {
    let client = &ctx.client;
    match sub {
        RoleCommands::List => {
            let roles = client.list_roles().await?;
            let mut table = new_table(["ID", "Name", "Description", "Created"]);
            for role in &roles {
                table.add_row(vec![
                    role.id.clone(),
                    role.name.clone(),
                    or_dash(role.description.as_ref()),
                    age(role.created_at.as_deref()),
                ]);
            }
            print_table(&table, "No roles.");
        }
        RoleCommands::Show { id } => print_record(&client.get_role(&id).await?),
        RoleCommands::Create { name, description } => {
            let request = CreateRoleRequest::new(name, description)?;
            let role = client.create_role(&request).await?;
            success(format!("Role \"{}\" created successfully", request.name()));
            if let Some(role) = role {
                print_record(&role);
            }
        }
        RoleCommands::Delete { id } => {
            client.delete_role(&id).await?;
            success(format!("Role \"{}\" deleted successfully", id));
        }
    }
    Ok(())
}
