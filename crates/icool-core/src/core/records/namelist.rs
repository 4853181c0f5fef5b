//! Namelist-only records: `&cont`, `&ints` and the histogram groups.

use super::{CommandParam, CommandParams, CommandSchema, Record};
use crate::core::error::InputError;
use crate::core::io::format::write_namelist;
use crate::core::io::traits::For001;
use crate::core::value::{ParamType, Value};
use std::io::Write;

/// Histogram and diagnostic namelists, written empty after `&ints`.
pub const HISTOGRAM_NAMELISTS: [&str; 6] = ["nhs", "nsc", "nzh", "nrh", "nem", "ncv"];

const fn opt(name: &'static str, kind: ParamType, desc: &'static str) -> CommandParam {
    CommandParam::optional(name, kind, desc)
}

static CONT: CommandSchema = CommandSchema {
    name: "Cont",
    params: &[
        opt("betaperp", ParamType::Real, "beta value to use in calculating amplitude variable A^2 [m]"),
        opt("bgen", ParamType::Logical, "if .true. => generate initial beam particles, otherwise read input from FOR003.DAT")
            .default_value(".true."),
        opt("bunchcut", ParamType::Real, "maximum time difference allowed between a particle and the reference particle [s]")
            .default_value("1E6"),
        opt("bzfldprd", ParamType::Real, "Bz for solenoid at location of production plane [T]"),
        opt("dectrk", ParamType::Logical, "if .true. => continue tracking daughter particle following decay")
            .default_value(".false."),
        opt("diagref", ParamType::Logical, "if .true. => continue tracking the reference particle through diagnostics")
            .default_value(".false."),
        opt("epsf", ParamType::Real, "desired tolerance on fractional field variation, energy loss and multiple scattering per step")
            .default_value("0.05"),
        opt("epsreq", ParamType::Real, "required tolerance on error in tracking parameters")
            .default_value("1E-3"),
        opt("epsstep", ParamType::Real, "desired tolerance in spatial stepping to reach each destination plane [m]")
            .default_value("1E-6"),
        opt("ffcr", ParamType::Logical, "if .true. => inserts form feed and carriage returns in the output log file")
            .default_value(".false."),
        opt("forcerp", ParamType::Logical, "if .true. => set x, y, Px and Py for reference particle to 0 for each new REFP command")
            .default_value(".true."),
        opt("fsav", ParamType::Logical, "if .true. => store particle info at plane IZFILE into file FOR004.DAT")
            .default_value(".false."),
        opt("fsavset", ParamType::Logical, "if .true. => modify data stored using FSAV in FOR004.DAT to have z=0 and times relative to reference particle")
            .default_value(".false."),
        opt("f9dp", ParamType::Integer, "number of digits after the decimal point for floating point variables in FOR009.DAT"),
        opt("goodtrack", ParamType::Logical, "if .true. and BGEN=.false. => only accepts input data from file FOR003.DAT if IPFLG=0")
            .default_value(".true."),
        opt("izfile", ParamType::Integer, "z-plane where particle info is desired when using FSAV"),
        opt("magconf", ParamType::Integer, "if 19 < MAGCONF=mn < 100 => reads in file FOR0mn.DAT with magnet configuration data")
            .default_value("0"),
        opt("mapdef", ParamType::Integer, "if 19 < MAPDEF=mn < 100 => reads in file FOR0mn.DAT with field map definitions")
            .default_value("0"),
        opt("neighbor", ParamType::Logical, "if .true. => include fields from previous and following regions")
            .default_value(".false."),
        opt("neutrino", ParamType::Integer, "if 19 < NEUTRINO=mn < 100 => writes out file FOR0mn.DAT with neutrino production data")
            .default_value("0"),
        opt("nnudk", ParamType::Integer, "# of neutrinos to produce at each muon, pion and kaon decay")
            .default_value("1"),
        opt("npart", ParamType::Integer, "# of particles in simulation"),
        opt("nprnt", ParamType::Integer, "Number of diagnostic events to print out to log file")
            .default_value("-1"),
        opt("npskip", ParamType::Integer, "Number of input particles in external beam file to skip before processing starts")
            .default_value("0"),
        opt("nsections", ParamType::Integer, "# of times to repeat basic cooling section")
            .default_value("1"),
        opt("ntuple", ParamType::Logical, "if .true. => store information about each particle after every region in file FOR009.DAT")
            .default_value(".false."),
        opt("nuthmin", ParamType::Real, "Minimum polar angle to write neutrino production data to file [radians]")
            .default_value("0"),
        opt("nuthmax", ParamType::Real, "Maximum polar angle to write neutrino production data to file [radians]")
            .default_value("3.14"),
        opt("output1", ParamType::Logical, "if .true. => write particle information at production (plane 1) to the postprocessor output file")
            .default_value(".false."),
        opt("phantom", ParamType::Logical, "if .true. => force particle to keep initial transverse coordinates after every step")
            .default_value(".false."),
        opt("phasemodel", ParamType::Integer, "controls how the phase is determined in rf cavities: 1 from ACCEL, 2-6 from REFP, 7 from file")
            .default_value("1")
            .bounded(1.0, 7.0),
        opt("prlevel", ParamType::Integer, "Controls level of print information to log file (for NPRINT events)")
            .default_value("1")
            .bounded(1.0, 4.0),
        opt("prnmax", ParamType::Integer, "Sets maximum number of steps to generate print out inside a region")
            .default_value("300"),
        opt("pzmintrk", ParamType::Real, "Sets the value of Pz below which tracking stops [GeV/c]")
            .default_value("0.001"),
        opt("rfdiag", ParamType::Integer, "if 19 < RFDIAG=mn < 100 => writes rf diagnostic information at the end of each accelerator region")
            .default_value("0")
            .bounded(19.0, 100.0),
        opt("rfphase", ParamType::Integer, "If PHASEMODEL=5 => reads rf phases, frequencies and gradients from file FOR0mn.DAT")
            .default_value("0")
            .bounded(19.0, 100.0),
        opt("rnseed", ParamType::Integer, "Random number seed; set to a negative integer")
            .default_value("-1"),
        opt("rtuple", ParamType::Logical, "If .true. => particle information in file FOR009.DAT is generated after every RTUPLEN steps")
            .default_value(".false."),
        opt("rtuplen", ParamType::Integer, "# of steps to skip between RTUPLE generated outputs")
            .default_value("5"),
        opt("run_env", ParamType::Logical, "If .true. => run ICOOL in beam envelope mode, i.e. no tracking")
            .default_value(".false."),
        opt("scalestep", ParamType::Real, "Factor that modifies all step sizes in a problem simultaneously")
            .default_value("1.0"),
        opt("spin", ParamType::Logical, "If .true. => include calculation of polarization")
            .default_value(".false."),
        opt("spinmatter", ParamType::Integer, "Controls whether muon depolarization effects in matter are simulated")
            .default_value("0")
            .bounded(0.0, 3.0),
        opt("spintrk", ParamType::Integer, "Controls whether spin variables are tracked")
            .default_value("0")
            .bounded(0.0, 1.0),
        opt("stepmax", ParamType::Real, "maximum step size that can be used for variable stepping [m]")
            .default_value("1"),
        opt("stepmin", ParamType::Real, "minimum step size that can be used for variable stepping [m]")
            .default_value("1E-5"),
        opt("steprk", ParamType::Logical, "If .true. => use 4th order Runge-Kutta integrator for tracking")
            .default_value(".true."),
        opt("summary", ParamType::Logical, "if .true. => writes region summary table to for007.dat")
            .default_value(".true."),
        opt("termout", ParamType::Logical, "If .true. => write output to terminal screen")
            .default_value(".true."),
        opt("timelim", ParamType::Real, "Time limit for simulation [min]")
            .default_value("1E9"),
        opt("varstep", ParamType::Logical, "If .true. => use adaptive step size; otherwise use fixed step ZSTEP")
            .default_value(".true."),
    ],
};

static INTS: CommandSchema = CommandSchema {
    name: "Ints",
    params: &[
        opt("ldedx", ParamType::Logical, "If .true. => simulate mean ionization energy loss dE/dx")
            .default_value(".true."),
        opt("lscatter", ParamType::Logical, "if .true. => simulate multiple scattering")
            .default_value(".true."),
        opt("lstrag", ParamType::Logical, "If .true. => simulate energy straggling")
            .default_value(".true."),
        opt("ldecay", ParamType::Logical, "If .true. => simulate particle decays")
            .default_value(".true."),
        opt("ldray", ParamType::Logical, "If .true. => simulate discrete energy loss from delta rays")
            .default_value(".true."),
        opt("linteract", ParamType::Logical, "If .true. => simulate inelastic nuclear interactions of pions, kaons and protons")
            .default_value(".false."),
        opt("lspace", ParamType::Logical, "If .true. => consider effects of space charge")
            .default_value(".false."),
        opt("lelms", ParamType::Logical, "If .true. => use ELMS model2 for energy loss and scattering")
            .default_value(".false."),
        opt("lsamcs", ParamType::Logical, "If .true. => use SAMCS model3 of correlated straggling and scattering")
            .default_value(".false."),
        opt("delev", ParamType::Integer, "Model level for dEdx")
            .default_value("2")
            .bounded(1.0, 4.0),
        opt("scatlev", ParamType::Integer, "Model level for multiple scattering")
            .default_value("6")
            .bounded(1.0, 6.0),
        opt("straglev", ParamType::Integer, "Model level for straggling")
            .default_value("4")
            .bounded(1.0, 5.0),
        opt("declev", ParamType::Integer, "Model level for particle decays")
            .default_value("1")
            .bounded(1.0, 5.0),
        opt("intlev", ParamType::Integer, "Model level for nuclear interactions")
            .default_value("1")
            .bounded(1.0, 2.0),
        opt("spacelev", ParamType::Integer, "Model level for space charge")
            .default_value("3")
            .bounded(1.0, 4.0),
        opt("dcute", ParamType::Real, "Kinetic energy of electrons above which delta rays are discretely simulated [GeV]")
            .default_value("0.003"),
        opt("dcutm", ParamType::Real, "Kinetic energy of muons and other heavy particles above which delta rays are discretely simulated [GeV]")
            .default_value("0.003"),
        opt("elmscor", ParamType::Integer, "ELMS correlation: 0 no correlation, 1 correlated")
            .default_value("0")
            .bounded(0.0, 1.0),
        opt("facfms", ParamType::Real, "Factor to correct the Z(Z+1) term in the characteristic angle squared in Moliere scattering")
            .default_value("1.0"),
        opt("facmms", ParamType::Real, "Factor to correct screening angle squared in Moliere multiple scattering")
            .default_value("1.0"),
        opt("fastdecay", ParamType::Logical, "If .true. => use unphysical decay constants to make {mu,pi,K} decay immediately")
            .default_value(".false."),
        opt("frfbunsc", ParamType::Real, "RF frequency used for space charge model 4 [MHz]")
            .default_value("201"),
        opt("parbunsc", ParamType::Real, "Number of muons per bunch for space charge calculation")
            .default_value("4E12"),
        opt("pdelev4", ParamType::Real, "Momentum for DELEV=4 calculation [GeV/c]")
            .default_value("0.200"),
        opt("wanga", ParamType::Real, "Wang parameter A").default_value("90.1"),
        opt("wangb", ParamType::Real, "Wang parameter B").default_value("3.35"),
        opt("wangc", ParamType::Real, "Wang parameter C").default_value("1.22"),
        opt("wangd", ParamType::Real, "Wang parameter D").default_value("4.66"),
        opt("wangpmx", ParamType::Real, "Wang parameter pMAX; its sign selects the Wang model variant")
            .default_value("1.500"),
        opt("wangfmx", ParamType::Real, "The maximum value of the Wang differential cross section")
            .default_value("13.706"),
    ],
};

/// The `&cont` control-variable namelist.
#[derive(Debug, Clone, PartialEq)]
pub struct Cont {
    params: CommandParams,
}

impl Cont {
    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        CommandParams::new(&CONT, attrs).map(|params| Self { params })
    }

    pub fn schema() -> &'static CommandSchema {
        &CONT
    }
}

impl Default for Cont {
    fn default() -> Self {
        Self {
            params: CommandParams::empty(&CONT),
        }
    }
}

impl Record for Cont {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl For001 for Cont {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        write_namelist(writer, "cont", self.params.set_values())?;
        Ok(())
    }
}

/// The `&ints` interaction-control namelist.
#[derive(Debug, Clone, PartialEq)]
pub struct Ints {
    params: CommandParams,
}

impl Ints {
    pub fn new<I>(attrs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        CommandParams::new(&INTS, attrs).map(|params| Self { params })
    }

    pub fn schema() -> &'static CommandSchema {
        &INTS
    }
}

impl Default for Ints {
    fn default() -> Self {
        Self {
            params: CommandParams::empty(&INTS),
        }
    }
}

impl Record for Ints {
    fn params(&self) -> &CommandParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut CommandParams {
        &mut self.params
    }
}

impl For001 for Ints {
    fn write_for001(&self, writer: &mut impl Write) -> Result<(), InputError> {
        write_namelist(writer, "ints", self.params.set_values())?;
        Ok(())
    }
}

/// Writes one of the histogram groups with nothing set.
pub fn write_empty_namelist(writer: &mut impl Write, name: &str) -> Result<(), InputError> {
    write_namelist(writer, name, std::iter::empty::<(&str, &str)>())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    #[test]
    fn cont_writes_only_set_values() {
        let co = Cont::new(attrs! { "npart" => 10000 }).unwrap();
        assert_eq!(co.to_for001_string().unwrap(), "&cont npart=10000 /\n");
    }

    #[test]
    fn default_namelists_are_empty() {
        assert_eq!(Cont::default().to_for001_string().unwrap(), "&cont /\n");
        assert_eq!(Ints::default().to_for001_string().unwrap(), "&ints /\n");
    }

    #[test]
    fn cont_values_follow_declaration_order() {
        let co = Cont::new(attrs! {
            "varstep" => false,
            "npart" => 100,
            "bgen" => true,
            "epsf" => 0.01,
            "rnseed" => -3,
            "nprnt" => 2,
        })
        .unwrap();
        assert_eq!(
            co.to_for001_string().unwrap(),
            "&cont bgen=.true. epsf=0.01 npart=100 nprnt=2 rnseed=-3 \nvarstep=.false. /\n"
        );
    }

    #[test]
    fn cont_rejects_unknown_variables() {
        assert!(matches!(
            Cont::new(attrs! { "nparticles" => 10 }),
            Err(InputError::UnknownField { command: "Cont", .. })
        ));
    }

    #[test]
    fn ints_rejects_integers_for_logicals() {
        assert!(matches!(
            Ints::new(attrs! { "ldecay" => 0 }),
            Err(InputError::IncorrectType {
                expected: ParamType::Logical,
                ..
            })
        ));
    }

    #[test]
    fn ints_update_is_call_style() {
        let mut ints = Ints::default();
        ints.update(attrs! { "ldecay" => false, "delev" => 4 }).unwrap();
        assert_eq!(
            ints.to_for001_string().unwrap(),
            "&ints ldecay=.false. delev=4 /\n"
        );
    }

    #[test]
    fn empty_histogram_namelist() {
        let mut buf = Vec::new();
        write_empty_namelist(&mut buf, "nhs").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "&nhs /\n");
    }

    #[test]
    fn schemas_have_unique_names() {
        for schema in [Cont::schema(), Ints::schema()] {
            let mut names: Vec<_> = schema.params.iter().map(|p| p.name).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "{} repeats a name", schema.name);
        }
    }
}
