use thunderdome::Index;

pub type ComponentId = Index;

/// The capability categories a node tracks singleton slots for.
///
/// Kinds are explicit tags rather than runtime type tests: a component
/// declares its kind once and attachment consults the matching slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Camera,
    Light,
    Renderer,
    RenderableContainer,
    ParticleSystem,
    ReflectionProbe,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Camera,
        ComponentKind::Light,
        ComponentKind::Renderer,
        ComponentKind::RenderableContainer,
        ComponentKind::ParticleSystem,
        ComponentKind::ReflectionProbe,
    ];

    pub(crate) fn slot_index(self) -> usize {
        match self {
            ComponentKind::Camera => 0,
            ComponentKind::Light => 1,
            ComponentKind::Renderer => 2,
            ComponentKind::RenderableContainer => 3,
            ComponentKind::ParticleSystem => 4,
            ComponentKind::ReflectionProbe => 5,
        }
    }
}

/// A capability attached to a scene node.
///
/// The transform core only needs the kind tag; camera/light/renderer
/// subsystems implement this for their concrete types and read the world
/// matrices of the nodes they are attached to.
pub trait Component {
    fn kind(&self) -> ComponentKind;
}
