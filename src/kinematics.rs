use std::f64::consts::PI;

/// Four-momentum built from collider coordinates (pt, eta, phi, m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorentzVector {
    pt: f64,
    eta: f64,
    phi: f64,
    m: f64,
}

impl LorentzVector {
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        Self { pt, eta, phi, m }
    }

    pub fn pt(&self) -> f64 {
        self.pt
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn px(&self) -> f64 {
        self.pt * self.phi.cos()
    }

    pub fn py(&self) -> f64 {
        self.pt * self.phi.sin()
    }

    pub fn pz(&self) -> f64 {
        self.pt * self.eta.sinh()
    }

    /// |p| = pt * cosh(eta)
    pub fn p(&self) -> f64 {
        self.pt * self.eta.cosh()
    }

    pub fn e(&self) -> f64 {
        let p = self.p();
        (p * p + self.m * self.m).sqrt()
    }

    /// Azimuthal difference wrapped into [-pi, pi].
    pub fn delta_phi(&self, other: &LorentzVector) -> f64 {
        let mut dphi = self.phi - other.phi;
        while dphi > PI {
            dphi -= 2.0 * PI;
        }
        while dphi < -PI {
            dphi += 2.0 * PI;
        }
        dphi
    }

    pub fn delta_eta(&self, other: &LorentzVector) -> f64 {
        self.eta - other.eta
    }

    pub fn delta_r(&self, other: &LorentzVector) -> f64 {
        self.delta_phi(other).hypot(self.delta_eta(other))
    }
}
