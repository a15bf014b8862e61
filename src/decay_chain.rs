use crate::error::Result;
use crate::genealogy::{children_of, VisitationSet};
use crate::kinematics::LorentzVector;
use crate::mass_table::MassTable;
use crate::particle_db::ParticleDb;
use crate::types::GeneratorRecord;
use std::io::Write;

/// Width of the status-flag bit string, matching the NanoAOD flag word.
const STATUS_FLAG_BITS: usize = 15;

/// Significant digits of kinematic values, as printed by C's `%g`.
const SIG_DIGITS: usize = 6;

/// Lookups the renderer needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub db: &'a ParticleDb,
    pub masses: &'a MassTable,
}

impl<'a> RenderContext<'a> {
    pub fn new(db: &'a ParticleDb, masses: &'a MassTable) -> Self {
        Self { db, masses }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub trees: usize,
    pub particles: usize,
}

/// Writes one indented tree per root particle of the event.
///
/// A single visitation set spans all trees, so a particle is printed at most
/// once per event.
pub fn render_event<W: Write>(
    record: &GeneratorRecord,
    ctx: &RenderContext<'_>,
    out: &mut W,
) -> Result<RenderSummary> {
    let mut visited = VisitationSet::new();
    let mut summary = RenderSummary::default();

    for root in record.roots() {
        summary.trees += 1;
        summary.particles += render_particle(record, ctx, root, "", &mut visited, out)?;
    }

    log::debug!(
        "event {}: rendered {} particles in {} trees",
        record.event(),
        summary.particles,
        summary.trees
    );
    Ok(summary)
}

fn render_particle<W: Write>(
    record: &GeneratorRecord,
    ctx: &RenderContext<'_>,
    idx: usize,
    prefix: &str,
    visited: &mut VisitationSet,
    out: &mut W,
) -> Result<usize> {
    let info = ctx.db.get(record.pdg_id(idx))?;
    let daughters = children_of(idx, visited, record);

    let mass = ctx
        .masses
        .mass_or(record.pdg_id(idx), record.mass(idx) as f64);
    let p4 = LorentzVector::from_pt_eta_phi_m(
        record.pt(idx) as f64,
        record.eta(idx) as f64,
        record.phi(idx) as f64,
        mass,
    );

    writeln!(
        out,
        "{} <{}> pt = {} eta = {} phi = {} E = {} m = {} index = {} flag = {} \
         particleStatus = {} charge = {} type = {} mother_idx = {}",
        info.name,
        record.pdg_id(idx),
        format_g(p4.pt()),
        format_g(p4.eta()),
        format_g(p4.phi()),
        format_g(p4.e()),
        format_g(p4.m()),
        idx,
        flag_bits(record.status_flags(idx)),
        record.status(idx),
        info.charge,
        info.category,
        record.mother_idx(idx),
    )?;

    let mut rendered = 1;
    for (n, &daughter) in daughters.iter().enumerate() {
        write!(out, "{}+-> ", prefix)?;
        let bar = if n == daughters.len() - 1 { ' ' } else { '|' };
        let child_prefix = format!("{}{}   ", prefix, bar);
        rendered += render_particle(record, ctx, daughter, &child_prefix, visited, out)?;
    }
    Ok(rendered)
}

fn flag_bits(flags: i32) -> String {
    let mask = (1u32 << STATUS_FLAG_BITS) - 1;
    format!("{:0width$b}", flags as u32 & mask, width = STATUS_FLAG_BITS)
}

/// `%g` style: [`SIG_DIGITS`] significant digits without trailing zeros,
/// scientific notation when the exponent is below -4 or at least
/// [`SIG_DIGITS`].
fn format_g(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{:.*e}", SIG_DIGITS - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or_default();

    if exp < -4 || exp >= SIG_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (SIG_DIGITS as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
