use spingame_core::{Cue, CueError, CuePlayer};
use tracing::warn;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

pub(crate) fn cue_src(cue: Cue) -> String {
    format!("/sounds/{}.mp3", cue.name())
}

/// One `<audio>` element per cue, created up front.
pub struct HtmlAudioCues {
    spin: Option<HtmlAudioElement>,
    win: Option<HtmlAudioElement>,
    lose: Option<HtmlAudioElement>,
}

impl HtmlAudioCues {
    pub fn load() -> Self {
        let element = |cue| HtmlAudioElement::new_with_src(&cue_src(cue)).ok();
        Self {
            spin: element(Cue::Spin),
            win: element(Cue::Win),
            lose: element(Cue::Lose),
        }
    }

    fn element(&self, cue: Cue) -> Option<&HtmlAudioElement> {
        match cue {
            Cue::Spin => self.spin.as_ref(),
            Cue::Win => self.win.as_ref(),
            Cue::Lose => self.lose.as_ref(),
        }
    }
}

impl CuePlayer for HtmlAudioCues {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        let audio = self
            .element(cue)
            .ok_or_else(|| CueError::Unavailable(cue_src(cue)))?;
        audio.set_current_time(0.0);
        let pending = audio
            .play()
            .map_err(|e| CueError::Playback(format!("{e:?}")))?;
        // autoplay policy and missing files surface as a rejected promise
        spawn_local(async move {
            if let Err(err) = JsFuture::from(pending).await {
                warn!(cue = %cue, error = ?err, "cue playback rejected");
            }
        });
        Ok(())
    }
}
