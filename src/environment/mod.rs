//! Buffer-backed environment adapter.
//!
//! [`SwerveEnv`] owns the shared [`EnvBuffers`], lends them to a [`Simulator`]
//! on every call, and reports episode returns from the terminal mask. It does
//! no simulation of its own.

use tracing::{debug, info, trace};

use crate::buffers::EnvBuffers;
use crate::config::SwerveConfig;
use crate::error::{EnvError, Result};
use crate::render::{PlotView, RenderMode, Renderer};
use crate::simulator::{Simulator, SwerveSimulator};
use crate::spaces::BoxSpace;
use crate::{generate_id, Id};

/// Per-step metadata emitted when at least one agent finished an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeInfo {
    /// Mean reward of the agents whose terminal flag is set this step.
    pub reward: f32,
}

/// Result of a single environment step.
///
/// The slices borrow the environment's buffers; they are valid until the
/// next call that mutates the environment.
#[derive(Debug)]
pub struct StepResult<'a> {
    /// `N × 6` observations, row-major.
    pub observations: &'a [f32],
    /// Reward per agent.
    pub rewards: &'a [f32],
    /// Terminal flag per agent.
    pub terminals: &'a [bool],
    /// Truncation flag per agent.
    pub truncations: &'a [bool],
    /// Empty, or one entry summarizing terminated agents.
    pub info: Vec<EpisodeInfo>,
}

/// Vectorized swerve drive environment.
///
/// # Lifecycle
///
/// 1. Build with [`SwerveEnv::new`] (or [`SwerveEnv::native`]).
/// 2. Call [`SwerveEnv::reset`] to start episodes.
/// 3. Call [`SwerveEnv::step`] with `N × 3` actions; optionally
///    [`SwerveEnv::render`].
/// 4. Call [`SwerveEnv::close`]. Later calls return [`EnvError::Closed`].
#[derive(Debug)]
pub struct SwerveEnv<S: Simulator> {
    id: Id,
    buffers: EnvBuffers,
    simulator: S,
    observation_space: BoxSpace,
    action_space: BoxSpace,
    renderer: Renderer,
    size: usize,
    closed: bool,
}

impl<S: Simulator> SwerveEnv<S> {
    /// Allocates buffers for `num_agents` and binds `simulator` to them.
    ///
    /// `size` is stored but does not configure the simulation.
    pub fn new(num_agents: usize, render_mode: RenderMode, size: usize, simulator: S) -> Result<Self> {
        let buffers = EnvBuffers::new(num_agents)?;
        Self::with_buffers(buffers, render_mode, size, simulator)
    }

    /// Binds `simulator` to caller-provided buffers.
    pub fn with_buffers(
        buffers: EnvBuffers,
        render_mode: RenderMode,
        size: usize,
        simulator: S,
    ) -> Result<Self> {
        if simulator.num_agents() != buffers.num_agents() {
            return Err(EnvError::ShapeMismatch {
                buffer: "observations",
                expected: vec![simulator.num_agents(), SwerveConfig::OBS_DIM],
                actual: buffers.observation_shape().to_vec(),
            });
        }

        let env = Self {
            id: generate_id(),
            buffers,
            simulator,
            observation_space: BoxSpace::new(0.0, 1.0, SwerveConfig::OBS_DIM),
            action_space: BoxSpace::new(-1.0, 1.0, SwerveConfig::ACTION_DIM),
            renderer: Renderer::new(render_mode),
            size,
            closed: false,
        };
        info!(
            env_id = %env.id,
            agents = env.num_agents(),
            simulator = env.simulator.name(),
            render_mode = %render_mode,
            "environment created"
        );
        Ok(env)
    }

    /// Replaces the renderer, e.g. to write frames somewhere other than stdout.
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Sets the world window used by plot rendering.
    pub fn with_plot_view(mut self, view: PlotView) -> Self {
        self.renderer.set_view(view);
        self
    }

    /// Starts new episodes for all agents.
    ///
    /// Returns the observation buffer and empty metadata.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(&[f32], Vec<EpisodeInfo>)> {
        self.ensure_open()?;
        self.simulator.reset(&mut self.buffers, seed)?;
        debug!(env_id = %self.id, ?seed, "environment reset");
        Ok((self.buffers.observations(), Vec::new()))
    }

    /// Copies `actions` into the action buffer and advances the simulator.
    ///
    /// Values are passed through unclamped. `actions` must hold exactly
    /// `N × 3` values, row-major.
    pub fn step(&mut self, actions: &[f32]) -> Result<StepResult<'_>> {
        self.ensure_open()?;
        let expected = self.buffers.actions().len();
        if actions.len() != expected {
            return Err(EnvError::ActionLength {
                expected,
                actual: actions.len(),
            });
        }

        self.buffers.actions_mut().copy_from_slice(actions);
        self.simulator.step(&mut self.buffers)?;

        let info: Vec<EpisodeInfo> = self
            .buffers
            .terminal_reward_mean()
            .map(|reward| EpisodeInfo { reward })
            .into_iter()
            .collect();

        if let Some(episode) = info.first() {
            let finished = self.buffers.terminals().iter().filter(|t| **t).count();
            debug!(env_id = %self.id, finished, reward = episode.reward, "episodes finished");
        } else {
            trace!(env_id = %self.id, "step");
        }

        Ok(StepResult {
            observations: self.buffers.observations(),
            rewards: self.buffers.rewards(),
            terminals: self.buffers.terminals(),
            truncations: self.buffers.truncations(),
            info,
        })
    }

    /// Displays the simulator's render snapshot. Leaves simulation state untouched.
    pub fn render(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.renderer.mode() == RenderMode::None {
            return Ok(());
        }
        let snapshot = self.simulator.render_data()?;
        self.renderer.render(&snapshot)
    }

    /// Tears down the simulator and releases the plot canvas.
    ///
    /// Closing twice is a no-op. Once the simulator has shut down the
    /// environment counts as closed, even if flushing the render sink fails.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.simulator.close()?;
        self.closed = true;
        info!(env_id = %self.id, "environment closed");
        self.renderer.close()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(EnvError::Closed)
        } else {
            Ok(())
        }
    }

    /// Unique identifier of this environment instance.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn num_agents(&self) -> usize {
        self.buffers.num_agents()
    }

    /// Per-agent observation space: 6 values in `[0, 1]`.
    pub fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    /// Per-agent action space: 3 values in `[-1, 1]`.
    pub fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    /// The `size` passed at construction.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn render_mode(&self) -> RenderMode {
        self.renderer.mode()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn buffers(&self) -> &EnvBuffers {
        &self.buffers
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl SwerveEnv<SwerveSimulator> {
    /// Environment backed by the native [`SwerveSimulator`].
    ///
    /// The plot window follows the configured arena.
    pub fn native(
        num_agents: usize,
        render_mode: RenderMode,
        size: usize,
        config: SwerveConfig,
        seed: u64,
    ) -> Result<Self> {
        let view = PlotView::for_world(config.world_width, config.world_height);
        let simulator = SwerveSimulator::new(config, num_agents, seed)?;
        Ok(Self::new(num_agents, render_mode, size, simulator)?.with_plot_view(view))
    }
}
