//! Generic object command handlers: list, get, create, update, patch, delete.

use albkit_api::{AviClient, DynamicObject, PatchOp, Payload, RequestOptions};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ListArgs, PatchArgs, PatchOpArg, PayloadArgs, TargetArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ObjectRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "Tenant")]
    tenant: String,
}

impl From<&DynamicObject> for ObjectRow {
    fn from(obj: &DynamicObject) -> Self {
        Self {
            name: obj.name().unwrap_or_default().to_owned(),
            uuid: obj.uuid().unwrap_or_default().to_owned(),
            tenant: obj
                .get("tenant_ref")
                .and_then(serde_json::Value::as_str)
                .map(|r| util::ref_display(r).to_owned())
                .unwrap_or_default(),
        }
    }
}

fn object_id(obj: &DynamicObject) -> String {
    obj.uuid().unwrap_or_default().to_owned()
}

impl From<PatchOpArg> for PatchOp {
    fn from(op: PatchOpArg) -> Self {
        match op {
            PatchOpArg::Add => PatchOp::Add,
            PatchOpArg::Replace => PatchOp::Replace,
            PatchOpArg::Delete => PatchOp::Delete,
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(
    client: &AviClient,
    args: ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = util::resolve_kind(&args.kind)?;
    let mut opts = RequestOptions::new();
    if let Some(cloud) = args.cloud {
        opts = opts.param("cloud_ref.name", cloud);
    }
    for (key, value) in args.params {
        opts = opts.param(key, value);
    }

    let objects = client.dynamic(kind).get_all(&opts).await?;
    tracing::debug!(%kind, count = objects.len(), "listed objects");
    let out = output::render_list(
        global.output_format(),
        &objects,
        |o| ObjectRow::from(o),
        object_id,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn get(
    client: &AviClient,
    args: TargetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = util::resolve_kind(&args.kind)?;
    let resources = client.dynamic(kind);
    let opts = RequestOptions::new();

    let obj = match (args.uuid, args.name) {
        (Some(uuid), _) => resources.get(&uuid, &opts).await?,
        (None, Some(name)) => resources.get_by_name(&name, &opts).await?,
        (None, None) => return Err(missing_target()),
    };
    let out = output::render_single(global.output_format(), &obj, object_id);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn create(
    client: &AviClient,
    args: PayloadArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = util::resolve_kind(&args.kind)?;
    let body = util::read_object_file(&args.from_file)?;

    let created = client
        .dynamic(kind)
        .create(&body, &RequestOptions::new())
        .await?;
    output::print_status(
        &format!("Created {kind} {}", created.uuid().unwrap_or_default()),
        global.quiet,
    );
    let out = output::render_single(global.output_format(), &created, object_id);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn update(
    client: &AviClient,
    args: PayloadArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = util::resolve_kind(&args.kind)?;
    let body = util::read_object_file(&args.from_file)?;

    let updated = client
        .dynamic(kind)
        .update(&body, &RequestOptions::new())
        .await?;
    output::print_status(
        &format!("Updated {kind} {}", updated.uuid().unwrap_or_default()),
        global.quiet,
    );
    let out = output::render_single(global.output_format(), &updated, object_id);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn patch(
    client: &AviClient,
    args: PatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = util::resolve_kind(&args.kind)?;
    let body = util::read_object_file(&args.from_file)?;
    let op = PatchOp::from(args.op);

    let patched = client
        .dynamic(kind)
        .patch(&args.uuid, &body, op, &RequestOptions::new())
        .await?;
    output::print_status(
        &format!("Patched ({op}) {kind} {}", args.uuid),
        global.quiet,
    );
    let out = output::render_single(global.output_format(), &patched, object_id);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn delete(
    client: &AviClient,
    args: TargetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = util::resolve_kind(&args.kind)?;
    let target = match (&args.uuid, &args.name) {
        (Some(uuid), _) => uuid.clone(),
        (None, Some(name)) => format!("named '{name}'"),
        (None, None) => return Err(missing_target()),
    };
    if !util::confirm(
        &format!("Delete {kind} {target}? This cannot be undone."),
        "delete",
        global.yes,
    )? {
        return Ok(());
    }

    let resources = client.dynamic(kind);
    let opts = RequestOptions::new();
    match (args.uuid, args.name) {
        (Some(uuid), _) => resources.delete(&uuid, &opts).await?,
        (None, Some(name)) => resources.delete_by_name(&name, &opts).await?,
        (None, None) => return Err(missing_target()),
    }
    output::print_status(&format!("Deleted {kind} {target}"), global.quiet);
    Ok(())
}

pub async fn version(client: &AviClient, global: &GlobalOpts) -> Result<(), CliError> {
    let version = client.session().controller_version().await?;
    output::print_output(&version, global.quiet);
    Ok(())
}

fn missing_target() -> CliError {
    CliError::Validation {
        field: "target".into(),
        reason: "pass a uuid or --name".into(),
    }
}
