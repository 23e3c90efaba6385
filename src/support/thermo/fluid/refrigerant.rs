use std::fmt;

/// One component of a refrigerant blend.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub mole_fraction: f64,
}

/// A refrigerant descriptor: a pure fluid or a blend with fixed composition.
///
/// Mole fractions are carried as given. They are not required to sum to one
/// here; a property backend may reject an invalid composition.
///
/// # Example
///
/// ```
/// use twine_refrigeration::support::thermo::fluid::Refrigerant;
///
/// let r404a = Refrigerant::named("R404A");
/// assert_eq!(r404a.fluid_string(), "R125&R134A&R143A");
/// assert_eq!(r404a.components().len(), 3);
///
/// let r134a = Refrigerant::named("R134A");
/// assert!(!r134a.is_mixture());
/// assert_eq!(r134a.mole_fractions(), vec![1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Refrigerant {
    name: String,
    backend: String,
    components: Vec<Component>,
    envelope_resolution: Option<usize>,
}

impl Refrigerant {
    /// Backend used by the named blends.
    pub const DEFAULT_BACKEND: &'static str = "REFPROP";

    /// Creates a pure refrigerant with a single component of fraction one.
    #[must_use]
    pub fn pure(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            components: vec![Component {
                name: name.clone(),
                mole_fraction: 1.0,
            }],
            name,
            backend: Self::DEFAULT_BACKEND.to_owned(),
            envelope_resolution: None,
        }
    }

    /// Creates a blend from `(component, mole fraction)` pairs.
    #[must_use]
    pub fn mixture<S: Into<String>>(
        name: impl Into<String>,
        components: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            backend: Self::DEFAULT_BACKEND.to_owned(),
            components: components
                .into_iter()
                .map(|(name, mole_fraction)| Component {
                    name: name.into(),
                    mole_fraction,
                })
                .collect(),
            envelope_resolution: None,
        }
    }

    /// Returns a known blend by name, or a pure fluid for any other name.
    ///
    /// Known blends are R404A, R407F, R448A and R449A.
    #[must_use]
    pub fn named(name: &str) -> Self {
        match name {
            "R404A" => Self::r404a(),
            "R407F" => Self::r407f(),
            "R448A" => Self::r448a(),
            "R449A" => Self::r449a(),
            _ => Self::pure(name),
        }
    }

    /// R404A: R125/R134a/R143a.
    #[must_use]
    pub fn r404a() -> Self {
        Self::mixture(
            "R404A",
            [
                ("R125", 0.357_816_784_026_318),
                ("R134A", 0.038_263_995_041_071_2),
                ("R143A", 0.603_919_220_932_611),
            ],
        )
    }

    /// R407F: R32/R125/R134a.
    #[must_use]
    pub fn r407f() -> Self {
        Self::mixture(
            "R407F",
            [
                ("R32", 0.473_194_694_453_358),
                ("R125", 0.205_109_095_413_331),
                ("R134A", 0.321_696_210_133_311),
            ],
        )
    }

    /// R448A: R32/R125/R1234yf/R134a/R1234ze(E).
    #[must_use]
    pub fn r448a() -> Self {
        Self::mixture(
            "R448A",
            [
                ("R32", 0.431_218_201_988_559),
                ("R125", 0.186_914_131_481_992),
                ("R1234YF", 0.151_319_256_485_899),
                ("R134A", 0.177_586_673_617_217),
                ("R1234ZE", 0.052_961_736_426_332_9),
            ],
        )
    }

    /// R449A: R32/R125/R1234yf/R134a.
    #[must_use]
    pub fn r449a() -> Self {
        Self::mixture(
            "R449A",
            [
                ("R32", 0.407_364_566_995_509),
                ("R125", 0.179_481_207_732_065),
                ("R1234YF", 0.193_480_840_388_364),
                ("R134A", 0.219_673_384_884_062),
            ],
        )
    }

    /// Returns a copy with a different property backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Returns a copy with an explicit phase-envelope resolution hint.
    #[must_use]
    pub fn with_envelope_resolution(mut self, resolution: usize) -> Self {
        self.envelope_resolution = Some(resolution);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn envelope_resolution(&self) -> Option<usize> {
        self.envelope_resolution
    }

    #[must_use]
    pub fn is_mixture(&self) -> bool {
        self.components.len() > 1
    }

    /// Returns the mole fractions in component order.
    #[must_use]
    pub fn mole_fractions(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.mole_fraction).collect()
    }

    /// Returns the component names joined with `&`, as property backends expect.
    #[must_use]
    pub fn fluid_string(&self) -> String {
        self.components
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Formats the descriptor as `BACKEND::A[x_a]&B[x_b]`.
impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::", self.backend)?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}[{}]", component.name, component.mole_fraction)?;
        }
        Ok(())
    }
}
