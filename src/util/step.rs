/// One increment of a resumable simulation.
pub enum SimStep<F, A> {
    /// Progress was made and there is a frame worth showing.
    Frame(F),

    /// Progress was made with nothing new to show.
    Idle,

    /// The simulation finished with an answer; `step` must not be called again.
    Done(A),
}

/// A long-running computation restructured as a resumable state machine.
///
/// The caller decides when (and whether) to call `step` again, so a host can interleave steps
/// with other work and stay responsive. There are no hidden suspension points and no cancellation
/// token: abandoning the loop — simply never calling `step` again — is the cancellation
/// mechanism, and dropping the simulation releases everything it held.
pub trait StepSimulation: Sized {
    type Frame;
    type Answer;

    fn step(&mut self) -> SimStep<Self::Frame, Self::Answer>;

    /// Drives the simulation to completion, discarding frames.
    fn run(&mut self) -> Self::Answer {
        loop {
            if let SimStep::Done(answer) = self.step() {
                return answer;
            }
        }
    }

    /// The finite sequence of frames up to completion. The sequence can be regenerated from
    /// scratch by rebuilding the simulation, but not resumed mid-stream once abandoned.
    fn frames(self) -> Frames<Self> {
        Frames {
            simulation: self,
            answer: None,
        }
    }
}

pub struct Frames<S: StepSimulation> {
    simulation: S,
    answer: Option<S::Answer>,
}

impl<S: StepSimulation> Frames<S> {
    /// The answer, present once iteration has run dry.
    pub fn answer(&self) -> Option<&S::Answer> {
        self.answer.as_ref()
    }

    pub fn into_answer(self) -> Option<S::Answer> {
        self.answer
    }
}

impl<S: StepSimulation> Iterator for Frames<S> {
    type Item = S::Frame;

    fn next(&mut self) -> Option<Self::Item> {
        while self.answer.is_none() {
            match self.simulation.step() {
                SimStep::Frame(frame) => return Some(frame),
                SimStep::Idle => {}
                SimStep::Done(answer) => self.answer = Some(answer),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts to `limit`, surfacing a frame every other step.
    struct Countdown {
        count: u32,
        limit: u32,
    }

    impl StepSimulation for Countdown {
        type Frame = u32;
        type Answer = u32;

        fn step(&mut self) -> SimStep<u32, u32> {
            if self.count == self.limit {
                SimStep::Done(self.count)
            } else {
                self.count += 1_u32;

                if self.count % 2_u32 == 0_u32 {
                    SimStep::Frame(self.count)
                } else {
                    SimStep::Idle
                }
            }
        }
    }

    #[test]
    fn test_run() {
        assert_eq!(
            Countdown {
                count: 0_u32,
                limit: 5_u32
            }
            .run(),
            5_u32
        );
    }

    #[test]
    fn test_frames() {
        let mut frames: Frames<Countdown> = Countdown {
            count: 0_u32,
            limit: 5_u32,
        }
        .frames();

        assert_eq!(frames.answer(), None);
        assert_eq!((&mut frames).collect::<Vec<u32>>(), vec![2_u32, 4_u32]);
        assert_eq!(frames.answer(), Some(&5_u32));

        // Run dry: further `next` calls keep returning `None`.
        assert_eq!(frames.next(), None);
        assert_eq!(frames.into_answer(), Some(5_u32));
    }
}
